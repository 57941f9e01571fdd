use std::fmt;

use log::warn;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::attribute::{AttributeHeader, AttributeRecords, Residency, resident_content};
use crate::attributes::standard::{StandardInformation, STANDARD_INFORMATION_CONTENT_OFFSET};
use crate::attributes::data::Data;
use crate::attributes::index::{IndexNodeHeader, INDEX_ROOT_NODE_HEADER_OFFSET};

#[derive(Debug, Clone, Copy, FromPrimitive, PartialOrd, PartialEq, Eq, Serialize)]
#[repr(u32)]
pub enum NtfsAttributeType {
    StandardInformation = 16_u32,
    AttributeList = 32_u32,
    FileName = 48_u32,
    ObjectId = 64_u32,
    SecurityDescriptor = 80_u32,
    VolumeName = 96_u32,
    VolumeInformation = 112_u32,
    Data = 128_u32,
    IndexRoot = 144_u32,
    IndexAllocation = 160_u32,
    Bitmap = 176_u32,
    ReparsePoint = 192_u32,
    EaInformation = 208_u32,
    EA = 224_u32,
    PropertySet = 240_u32,
    LoggedUtilityStream = 256_u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NtfsAttribute
{
  StandardInformation(StandardInformation),
  Data(Data),
  IndexRoot(IndexNodeHeader),
  /// Any attribute type with no decoder here, kept as its header.
  Other(AttributeHeader),
}

impl NtfsAttribute
{
  /// Decode one attribute record, common header included.
  pub fn from_record(data : &[u8]) -> Result<NtfsAttribute>
  {
    let header = AttributeHeader::new(data)?;

    match (header.type_id, header.residency)
    {
      // the decoder reads from the record start, so the value is moved to 0x18
      (Some(NtfsAttributeType::StandardInformation), Residency::Resident{ content_offset, content_length }) =>
      {
        let mut rebased = vec![0u8; STANDARD_INFORMATION_CONTENT_OFFSET];
        rebased.extend(resident_content(data, content_offset, content_length)?);
        Ok(NtfsAttribute::StandardInformation(StandardInformation::new(&rebased)?))
      },
      (Some(NtfsAttributeType::Data), residency) => Ok(NtfsAttribute::Data(Data::new(data, residency)?)),
      (Some(NtfsAttributeType::IndexRoot), Residency::Resident{ content_offset, content_length }) =>
      {
        let content = resident_content(data, content_offset, content_length)?;
        let node = content.get(INDEX_ROOT_NODE_HEADER_OFFSET..).unwrap_or_default();
        Ok(NtfsAttribute::IndexRoot(IndexNodeHeader::new(node)?))
      },
      _ => Ok(NtfsAttribute::Other(header)),
    }
  }

  pub fn type_id(&self) -> Option<NtfsAttributeType>
  {
    match self
    {
      NtfsAttribute::StandardInformation(_) => Some(NtfsAttributeType::StandardInformation),
      NtfsAttribute::Data(_) => Some(NtfsAttributeType::Data),
      NtfsAttribute::IndexRoot(_) => Some(NtfsAttributeType::IndexRoot),
      NtfsAttribute::Other(header) => header.type_id,
    }
  }
}

impl fmt::Display for NtfsAttribute
{
  fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result
  {
    match self
    {
      NtfsAttribute::StandardInformation(info) => fmt::Display::fmt(info, f),
      NtfsAttribute::Data(data) => fmt::Display::fmt(data, f),
      NtfsAttribute::IndexRoot(node) => write!(f, "**** INDEX ROOT ****\n{}", node),
      NtfsAttribute::Other(header) => write!(f, "**** ATTRIBUTE 0x{:X} ****\nName: {}, Id: 0x{:X}, Length: 0x{:X}, Resident: {}",
                                              header.type_code, header.name.as_deref().unwrap_or(""), header.id, header.length, header.is_resident()),
    }
  }
}

pub struct NtfsAttributes
{
  pub attributes : Vec<NtfsAttribute>
}

impl NtfsAttributes
{
  pub fn new(attributes : Vec<NtfsAttribute>) -> Self
  {
    NtfsAttributes{ attributes }
  }

  /// Decode every attribute of an MFT entry. Records that fail are logged
  /// and skipped so the rest of the entry is still read.
  pub fn from_entry(entry : &[u8], first_attribute_offset : usize) -> Self
  {
    let mut attributes = Vec::new();

    for record in AttributeRecords::new(entry, first_attribute_offset)
    {
      match record.and_then(NtfsAttribute::from_record)
      {
        Ok(attribute) => attributes.push(attribute),
        Err(err) => warn!("Can't decode attribute : {}", err),
      }
    }

    NtfsAttributes::new(attributes)
  }

  pub fn find_standard_info(&self) -> Vec<&StandardInformation>
  {
    self.attributes.iter().filter_map(|attribute| match attribute
    {
      NtfsAttribute::StandardInformation(info) => Some(info),
      _ => None,
    }).collect()
  }

  pub fn find_datas(&self) -> Vec<&Data>
  {
    self.attributes.iter().filter_map(|attribute| match attribute
    {
      NtfsAttribute::Data(data) => Some(data),
      _ => None,
    }).collect()
  }

  pub fn find_index_root(&self) -> Option<&IndexNodeHeader>
  {
    self.attributes.iter().find_map(|attribute| match attribute
    {
      NtfsAttribute::IndexRoot(node) => Some(node),
      _ => None,
    })
  }
}

/// Decode independent attribute records in parallel, one result per record in
/// input order. A record that fails never affects the others.
pub fn decode_records<R : AsRef<[u8]> + Sync>(records : &[R]) -> Vec<Result<NtfsAttribute>>
{
  records.par_iter()
         .enumerate()
         .map(|(idx, record)| NtfsAttribute::from_record(record.as_ref()).map_err(|err|
         {
           warn!("Can't decode attribute record {} : {}", idx, err);
           err
         }))
         .collect()
}
