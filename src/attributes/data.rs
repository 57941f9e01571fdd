use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::attribute::{AttributeHeader, Residency, resident_content};
use crate::attributecontent::{ResidentData, NonResidentData};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DataContent
{
  Resident(ResidentData),
  NonResident(NonResidentData),
}

/// $DATA attribute. The populated variant is the only record of whether the
/// stream was resident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Data
{
  pub content : DataContent,
}

impl Data
{
  /// `data` is the whole attribute record; `residency` comes from its header.
  pub fn new(data : &[u8], residency : Residency) -> Result<Self>
  {
    let content = match residency
    {
      Residency::Resident{ content_offset, content_length } =>
        DataContent::Resident(ResidentData::new(resident_content(data, content_offset, content_length)?)),
      Residency::NonResident => DataContent::NonResident(NonResidentData::new(data)?),
    };

    Ok(Data{ content })
  }

  pub fn from_record(data : &[u8]) -> Result<Self>
  {
    let header = AttributeHeader::new(data)?;
    Data::new(data, header.residency)
  }

  pub fn resident_data(&self) -> Option<&ResidentData>
  {
    match &self.content
    {
      DataContent::Resident(resident) => Some(resident),
      DataContent::NonResident(_) => None,
    }
  }

  pub fn non_resident_data(&self) -> Option<&NonResidentData>
  {
    match &self.content
    {
      DataContent::Resident(_) => None,
      DataContent::NonResident(non_resident) => Some(non_resident),
    }
  }
}

impl fmt::Display for Data
{
  fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result
  {
    writeln!(f, "**** DATA ****")?;
    writeln!(f)?;
    match &self.content
    {
      DataContent::Resident(resident) => write!(f, "Resident Data\n{}", resident),
      DataContent::NonResident(non_resident) => write!(f, "Non Resident Data\n{}", non_resident),
    }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::error::NtfsError;
  use crate::attribute::tests::resident_record;
  use crate::attributecontent::DataRun;
  use crate::attributecontent::tests::non_resident_record;

  #[test]
  fn resident_hello()
  {
    let mut data : Vec<u8> = (0..24).collect();
    data.extend_from_slice(b"HELLO!");

    let attribute = Data::new(&data, Residency::Resident{ content_offset : 24, content_length : 6 }).unwrap();

    assert_eq!(attribute.resident_data().map(|resident| resident.data.as_slice()), Some(&b"HELLO!"[..]));
    assert!(attribute.non_resident_data().is_none());
  }

  #[test]
  fn resident_content_past_the_record()
  {
    let data = vec![0u8; 0x20];
    let attribute = Data::new(&data, Residency::Resident{ content_offset : 0x18, content_length : 0x10 });

    assert_eq!(attribute, Err(NtfsError::truncated("Resident content", 0x28, 0x20)));
  }

  #[test]
  fn non_resident_from_record()
  {
    let record = non_resident_record(&[0x31, 0x10, 0x00, 0x00, 0x02, 0x00]);
    let attribute = Data::from_record(&record).unwrap();

    assert!(attribute.resident_data().is_none());
    let non_resident = attribute.non_resident_data().unwrap();
    assert_eq!(non_resident.runs, vec![DataRun::Data{ lcn : 0x20000, length : 0x10 }]);
  }

  #[test]
  fn residency_is_taken_from_the_caller()
  {
    // same bytes, the caller decides which branch runs
    let record = resident_record(0x80, None, &[0u8; 0x40]);

    let resident = Data::new(&record, Residency::Resident{ content_offset : 0x18, content_length : 0x40 }).unwrap();
    let non_resident = Data::new(&record, Residency::NonResident).unwrap();

    assert!(matches!(resident.content, DataContent::Resident(_)));
    assert!(matches!(non_resident.content, DataContent::NonResident(_)));
  }

  #[test]
  fn renders_resident_bytes()
  {
    let record = resident_record(0x80, None, b"Hi");
    let rendered = Data::from_record(&record).unwrap().to_string();

    assert_eq!(rendered, "**** DATA ****\n\nResident Data\nData: 48-69");
  }
}
