use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NtfsError
{
  #[error("{attribute} record is truncated: {needed} bytes needed, {available} available")]
  TruncatedRecord{ attribute : &'static str, needed : usize, available : usize },

  #[error("{attribute} {field} timestamp {raw:#x} is out of range")]
  InvalidTimestamp{ attribute : &'static str, field : &'static str, raw : i64 },

  #[error("MFT attributes end")]
  AttributesEnd,

  #[error("MFT attribute has an invalid non resident flag {0}")]
  InvalidResidentFlag(u8),

  #[error("Non resident attribute has an invalid data run : {0}")]
  InvalidDataRun(&'static str),
}

impl NtfsError
{
  pub fn truncated(attribute : &'static str, needed : usize, available : usize) -> Self
  {
    NtfsError::TruncatedRecord{ attribute, needed, available }
  }
}

pub type Result<T> = std::result::Result<T, NtfsError>;

/// Return `TruncatedRecord` unless `data` holds at least `needed` bytes.
#[inline]
pub fn ensure_len(data : &[u8], needed : usize, attribute : &'static str) -> Result<()>
{
  if data.len() < needed
  {
    return Err(NtfsError::truncated(attribute, needed, data.len()))
  }
  Ok(())
}
