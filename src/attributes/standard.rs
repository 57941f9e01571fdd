use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{NtfsError, Result, ensure_len};
use crate::flags::FlagSet;
use crate::timestamp::{decode_timestamp, format_optional_timestamp};
use crate::attributes::{FileAttributes, StandardFlags};

const ATTRIBUTE_NAME : &str = "StandardInfo";

/// Offset of the value in a $STANDARD_INFORMATION record without a name.
pub const STANDARD_INFORMATION_CONTENT_OFFSET : usize = 0x18;
/// Record length of the NT 3.x / 4.0 layout, which stops after the class id.
pub const STANDARD_INFORMATION_LEGACY_SIZE : usize = 0x48;
/// Record length of the layout carrying owner, security, quota and USN.
pub const STANDARD_INFORMATION_SIZE : usize = 0x60;

/// Decoded $STANDARD_INFORMATION. Offsets are relative to the start of the
/// attribute record, whose resident header takes the first 0x18 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardInformation
{
  pub creation_time : Option<DateTime<Utc>>,
  pub altered_time : Option<DateTime<Utc>>,
  pub mft_altered_time : Option<DateTime<Utc>>,
  pub accessed_time : Option<DateTime<Utc>>,
  pub flags : FlagSet<FileAttributes>,
  pub version_maximum_number : u32,
  pub extended_flags : FlagSet<StandardFlags>,
  pub class_id : u32,

  pub owner_id : Option<u32>,
  pub security_id : Option<u32>,
  pub quota_charged : Option<u32>,
  pub usn : Option<u64>,

  /// Timestamps that could not be represented and were read as absent.
  #[serde(skip)]
  pub warnings : Vec<NtfsError>,
}

impl StandardInformation
{
  pub fn new(data : &[u8]) -> Result<Self>
  {
    ensure_len(data, STANDARD_INFORMATION_LEGACY_SIZE, ATTRIBUTE_NAME)?;
    if data.len() > STANDARD_INFORMATION_LEGACY_SIZE
    {
      ensure_len(data, STANDARD_INFORMATION_SIZE, ATTRIBUTE_NAME)?;
    }

    let mut warnings = Vec::new();
    let creation_time = decode_timestamp(LittleEndian::read_i64(&data[0x18..0x20]), ATTRIBUTE_NAME, "created", &mut warnings);
    let altered_time = decode_timestamp(LittleEndian::read_i64(&data[0x20..0x28]), ATTRIBUTE_NAME, "content modified", &mut warnings);
    let mft_altered_time = decode_timestamp(LittleEndian::read_i64(&data[0x28..0x30]), ATTRIBUTE_NAME, "record modified", &mut warnings);
    let accessed_time = decode_timestamp(LittleEndian::read_i64(&data[0x30..0x38]), ATTRIBUTE_NAME, "last accessed", &mut warnings);

    let flags = FlagSet::from_raw(LittleEndian::read_u32(&data[0x38..0x3c]));
    let version_maximum_number = LittleEndian::read_u32(&data[0x3c..0x40]);
    let extended_flags = FlagSet::from_raw(LittleEndian::read_u32(&data[0x40..0x44]));
    let class_id = LittleEndian::read_u32(&data[0x44..0x48]);

    let mut info = StandardInformation{
      creation_time,
      altered_time,
      mft_altered_time,
      accessed_time,
      flags,
      version_maximum_number,
      extended_flags,
      class_id,
      owner_id : None,
      security_id : None,
      quota_charged : None,
      usn : None,
      warnings,
    };

    if data.len() > STANDARD_INFORMATION_LEGACY_SIZE
    {
      info.owner_id = Some(LittleEndian::read_u32(&data[0x48..0x4c]));
      info.security_id = Some(LittleEndian::read_u32(&data[0x4c..0x50]));
      info.quota_charged = Some(LittleEndian::read_u32(&data[0x50..0x54]));
      info.usn = Some(LittleEndian::read_u64(&data[0x58..0x60]));
    }

    Ok(info)
  }
}

fn hex<T : fmt::UpperHex>(value : &Option<T>) -> String
{
  value.as_ref().map(|value| format!("0x{:X}", value)).unwrap_or_default()
}

impl fmt::Display for StandardInformation
{
  fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result
  {
    writeln!(f, "**** STANDARD INFO ****")?;
    writeln!(f, "Flags: {}, Max Version: 0x{:X}, Flags 2: {}, Class Id: 0x{:X}, Owner Id: {}, Security Id: {}, Quota Charged: {}",
             self.flags, self.version_maximum_number, self.extended_flags, self.class_id,
             hex(&self.owner_id), hex(&self.security_id), hex(&self.quota_charged))?;
    writeln!(f, "Update Sequence #: {}", hex(&self.usn))?;
    writeln!(f)?;
    writeln!(f, "Created On:\t\t{}", format_optional_timestamp(&self.creation_time))?;
    writeln!(f, "Content Modified On:\t{}", format_optional_timestamp(&self.altered_time))?;
    writeln!(f, "Record Modified On:\t{}", format_optional_timestamp(&self.mft_altered_time))?;
    write!(f, "Last Accessed On:\t{}", format_optional_timestamp(&self.accessed_time))
  }
}
