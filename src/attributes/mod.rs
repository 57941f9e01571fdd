pub mod standard;
pub mod data;
pub mod index;

bitflags!
{
  /// File attribute bits of $STANDARD_INFORMATION.
  pub struct FileAttributes : u32
  {
    const READONLY             = 0x0000_0001;
    const HIDDEN               = 0x0000_0002;
    const SYSTEM               = 0x0000_0004;
    const VOLUME_LABEL         = 0x0000_0008;
    const DIRECTORY            = 0x0000_0010;
    const ARCHIVE              = 0x0000_0020;
    const DEVICE               = 0x0000_0040;
    const NORMAL               = 0x0000_0080;
    const TEMPORARY            = 0x0000_0100;
    const SPARSE               = 0x0000_0200;
    const REPARSE              = 0x0000_0400;
    const COMPRESSED           = 0x0000_0800;
    const OFFLINE              = 0x0000_1000;
    const NOT_INDEXED          = 0x0000_2000;
    const ENCRYPTED            = 0x0000_4000;
    const INTEGRITY_STREAM     = 0x0000_8000;
    const VIRTUAL              = 0x0001_0000;
    const NO_SCRUB_DATA        = 0x0002_0000;
    const HAS_EA               = 0x0004_0000;
    const IS_DIRECTORY         = 0x1000_0000;
    const IS_INDEX_VIEW        = 0x2000_0000;
  }
}

named_flags!(FileAttributes, [
  (READONLY, "ReadOnly"),
  (HIDDEN, "Hidden"),
  (SYSTEM, "System"),
  (VOLUME_LABEL, "VolumeLabel"),
  (DIRECTORY, "Directory"),
  (ARCHIVE, "Archive"),
  (DEVICE, "Device"),
  (NORMAL, "Normal"),
  (TEMPORARY, "Temporary"),
  (SPARSE, "SparseFile"),
  (REPARSE, "ReparsePoint"),
  (COMPRESSED, "Compressed"),
  (OFFLINE, "Offline"),
  (NOT_INDEXED, "NotContentIndexed"),
  (ENCRYPTED, "Encrypted"),
  (INTEGRITY_STREAM, "IntegrityStream"),
  (VIRTUAL, "Virtual"),
  (NO_SCRUB_DATA, "NoScrubData"),
  (HAS_EA, "HasEa"),
  (IS_DIRECTORY, "IsDirectory"),
  (IS_INDEX_VIEW, "IsIndexView"),
]);

bitflags!
{
  /// Second flag field of $STANDARD_INFORMATION.
  pub struct StandardFlags : u32
  {
    const IS_CASE_SENSITIVE    = 0x0000_0001;
  }
}

named_flags!(StandardFlags, [
  (IS_CASE_SENSITIVE, "IsCaseSensitive"),
]);

bitflags!
{
  pub struct IndexNodeFlags : u32
  {
    const HAS_INDEX_ALLOCATION = 0x0000_0001;
  }
}

named_flags!(IndexNodeFlags, [
  (HAS_INDEX_ALLOCATION, "HasIndexAllocation"),
]);
