use byteorder::{ByteOrder, LittleEndian};
use num_traits::FromPrimitive;
use serde::Serialize;

use crate::error::{NtfsError, Result, ensure_len};
use crate::ntfsattributes::NtfsAttributeType;

pub const ATTRIBUTES_END : u32 = 0xffff_ffff;
pub const ATTRIBUTE_HEADER_SIZE : usize = 0x10;
pub const RESIDENT_HEADER_SIZE : usize = 0x16;

/// Where an attribute keeps its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Residency
{
  Resident{ content_offset : usize, content_length : usize },
  NonResident,
}

impl Residency
{
  pub fn is_resident(&self) -> bool
  {
    matches!(self, Residency::Resident{..})
  }
}

/// Header common to every attribute record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeHeader
{
  pub type_code   : u32,
  pub type_id     : Option<NtfsAttributeType>,
  pub length      : u32,
  pub name_size   : u8,
  pub name_offset : u16,
  pub flags       : u16,
  pub id          : u16,
  pub name        : Option<String>,
  pub residency   : Residency,
}

impl AttributeHeader
{
  pub fn new(data : &[u8]) -> Result<AttributeHeader>
  {
    ensure_len(data, 4, "Attribute header")?;
    let type_code = LittleEndian::read_u32(&data[0..4]);
    if type_code == ATTRIBUTES_END
    {
      return Err(NtfsError::AttributesEnd)
    }

    ensure_len(data, ATTRIBUTE_HEADER_SIZE, "Attribute header")?;
    let length = LittleEndian::read_u32(&data[4..8]);
    let non_resident_flag = data[8];
    let name_size = data[9];
    let name_offset = LittleEndian::read_u16(&data[10..12]);
    let flags = LittleEndian::read_u16(&data[12..14]);
    let id = LittleEndian::read_u16(&data[14..16]);

    let residency = match non_resident_flag
    {
      0 =>
      {
        ensure_len(data, RESIDENT_HEADER_SIZE, "Resident attribute header")?;
        Residency::Resident{
          content_length : LittleEndian::read_u32(&data[16..20]) as usize,
          content_offset : LittleEndian::read_u16(&data[20..22]) as usize,
        }
      },
      1 => Residency::NonResident,
      flag => return Err(NtfsError::InvalidResidentFlag(flag)),
    };

    let name = match name_size
    {
      0 => None,
      size =>
      {
        let start = name_offset as usize;
        let end = start + size as usize * 2;
        ensure_len(data, end, "Attribute name")?;
        Some(read_utf16(&data[start..end]))
      }
    };

    Ok(AttributeHeader{
      type_code,
      type_id : NtfsAttributeType::from_u32(type_code),
      length,
      name_size,
      name_offset,
      flags,
      id,
      name,
      residency,
    })
  }

  pub fn is_resident(&self) -> bool
  {
    self.residency.is_resident()
  }

  pub fn is_compressed(&self) -> bool
  {
    !self.is_resident() && (self.flags & 0x0001) == 0x0001
  }

  pub fn is_encrypted(&self) -> bool
  {
    !self.is_resident() && (self.flags & 0x4000) == 0x4000
  }

  pub fn is_sparse(&self) -> bool
  {
    !self.is_resident() && (self.flags & 0x8000) == 0x8000
  }
}

pub fn read_utf16(data : &[u8]) -> String
{
  let units : Vec<u16> = data.chunks_exact(2).map(LittleEndian::read_u16).collect();
  String::from_utf16_lossy(&units)
}

/// Copy the inline content of a resident attribute.
pub fn resident_content(data : &[u8], content_offset : usize, content_length : usize) -> Result<Vec<u8>>
{
  let end = content_offset.checked_add(content_length)
                          .ok_or_else(|| NtfsError::truncated("Resident content", usize::MAX, data.len()))?;
  ensure_len(data, end, "Resident content")?;
  Ok(data[content_offset..end].to_vec())
}

/// Walk the attribute records of an MFT entry whose fixups are already applied.
/// Ends on the end marker, a zero length, or the end of the buffer. A record
/// running past the buffer is returned once as an error.
pub struct AttributeRecords<'a>
{
  entry  : &'a [u8],
  offset : usize,
  done   : bool,
}

impl<'a> AttributeRecords<'a>
{
  pub fn new(entry : &'a [u8], first_attribute_offset : usize) -> Self
  {
    AttributeRecords{ entry, offset : first_attribute_offset, done : false }
  }
}

impl<'a> Iterator for AttributeRecords<'a>
{
  type Item = Result<&'a [u8]>;

  fn next(&mut self) -> Option<Self::Item>
  {
    if self.done || self.offset.checked_add(8).map_or(true, |end| end > self.entry.len())
    {
      return None
    }

    let data = &self.entry[self.offset..];
    let type_code = LittleEndian::read_u32(&data[0..4]);
    let length = LittleEndian::read_u32(&data[4..8]) as usize;
    if type_code == ATTRIBUTES_END || length == 0
    {
      self.done = true;
      return None
    }
    if length > data.len()
    {
      self.done = true;
      return Some(Err(NtfsError::truncated("Attribute record", length, data.len())))
    }

    self.offset += length;
    Some(Ok(&data[..length]))
  }
}

#[cfg(test)]
pub(crate) mod tests
{
  use super::*;

  /// Build a resident attribute record with its content at 0x18 (or after the name).
  pub fn resident_record(type_code : u32, name : Option<&str>, content : &[u8]) -> Vec<u8>
  {
    let name_units : Vec<u16> = name.map(|name| name.encode_utf16().collect()).unwrap_or_default();
    let content_offset = 0x18 + ((name_units.len() * 2 + 7) & !7);
    let length = (content_offset + content.len() + 7) & !7;

    let mut data = vec![0u8; length];
    LittleEndian::write_u32(&mut data[0..4], type_code);
    LittleEndian::write_u32(&mut data[4..8], length as u32);
    data[9] = name_units.len() as u8;
    LittleEndian::write_u16(&mut data[10..12], 0x18);
    LittleEndian::write_u32(&mut data[16..20], content.len() as u32);
    LittleEndian::write_u16(&mut data[20..22], content_offset as u16);
    for (idx, unit) in name_units.iter().enumerate()
    {
      LittleEndian::write_u16(&mut data[0x18 + idx * 2..0x1a + idx * 2], *unit);
    }
    data[content_offset..content_offset + content.len()].copy_from_slice(content);
    data
  }

  #[test]
  fn resident_header()
  {
    let record = resident_record(0x80, Some("Zone.Identifier"), b"[ZoneTransfer]");
    let header = AttributeHeader::new(&record).unwrap();

    assert_eq!(header.type_id, Some(NtfsAttributeType::Data));
    assert_eq!(header.name.as_deref(), Some("Zone.Identifier"));
    assert_eq!(header.length as usize, record.len());
    assert_eq!(header.residency, Residency::Resident{ content_offset : 0x38, content_length : 14 });
    assert!(!header.is_sparse());
  }

  #[test]
  fn non_resident_header()
  {
    let mut record = vec![0u8; 0x48];
    LittleEndian::write_u32(&mut record[0..4], 0x80);
    LittleEndian::write_u32(&mut record[4..8], 0x48);
    record[8] = 1;
    LittleEndian::write_u16(&mut record[12..14], 0x8000);

    let header = AttributeHeader::new(&record).unwrap();
    assert_eq!(header.residency, Residency::NonResident);
    assert!(header.is_sparse());
    assert!(!header.is_compressed());
  }

  #[test]
  fn header_errors()
  {
    assert_eq!(AttributeHeader::new(&[0xff; 16]), Err(NtfsError::AttributesEnd));
    assert_eq!(AttributeHeader::new(&[0x10, 0, 0, 0, 0x18]), Err(NtfsError::truncated("Attribute header", 16, 5)));

    let mut record = resident_record(0x10, None, &[0; 8]);
    record[8] = 7;
    assert_eq!(AttributeHeader::new(&record), Err(NtfsError::InvalidResidentFlag(7)));

    let mut record = resident_record(0x30, None, &[0; 8]);
    record[9] = 200;
    assert!(matches!(AttributeHeader::new(&record), Err(NtfsError::TruncatedRecord{..})));
  }

  #[test]
  fn unknown_type_code_is_kept()
  {
    let record = resident_record(0x1234, None, &[]);
    let header = AttributeHeader::new(&record).unwrap();

    assert_eq!(header.type_code, 0x1234);
    assert_eq!(header.type_id, None);
  }

  #[test]
  fn extracts_resident_content()
  {
    let mut data = vec![0xaa; 24];
    data.extend_from_slice(b"HELLO!");

    assert_eq!(resident_content(&data, 24, 6).unwrap(), b"HELLO!".to_vec());
    assert_eq!(resident_content(&data, 24, 0).unwrap(), Vec::<u8>::new());
    assert_eq!(resident_content(&data, 25, 6), Err(NtfsError::truncated("Resident content", 31, 30)));
    assert!(resident_content(&data, usize::MAX, 2).is_err());
  }

  #[test]
  fn walks_entry_until_end_marker()
  {
    let mut entry = vec![0u8; 0x38];
    entry.extend(resident_record(0x10, None, &[0; 0x30]));
    entry.extend(resident_record(0x80, None, b"data"));
    entry.extend_from_slice(&ATTRIBUTES_END.to_le_bytes());
    entry.resize(1024, 0);

    let records : Vec<&[u8]> = AttributeRecords::new(&entry, 0x38).collect::<Result<_>>().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(LittleEndian::read_u32(records[0]), 0x10);
    assert_eq!(LittleEndian::read_u32(records[1]), 0x80);
  }

  #[test]
  fn first_offset_past_the_entry()
  {
    let entry = resident_record(0x80, None, b"data");

    assert!(AttributeRecords::new(&entry, usize::MAX - 4).next().is_none());
    assert!(AttributeRecords::new(&entry, entry.len()).next().is_none());
  }

  #[test]
  fn overrunning_record_is_reported_once()
  {
    let mut entry = resident_record(0x80, None, b"data");
    LittleEndian::write_u32(&mut entry[4..8], 0x400);

    let mut records = AttributeRecords::new(&entry, 0);
    assert!(matches!(records.next(), Some(Err(NtfsError::TruncatedRecord{..}))));
    assert!(records.next().is_none());
  }
}
