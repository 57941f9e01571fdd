use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::error::{NtfsError, Result, ensure_len};

#[inline]
pub fn pad_u64(data : &[u8]) -> u64
{
  let mut padded = [0; 8];

  padded[..data.len()].clone_from_slice(data);
  LittleEndian::read_u64(&padded[0..8])
}

#[inline]
pub fn pad_i64(data : &[u8]) -> i64
{
  let mut padded = match (data[data.len() - 1] as i8) < 0
  {
    true =>  [0xff; 8],
    false => [0; 8],
  };

  padded[..data.len()].clone_from_slice(data);
  LittleEndian::read_i64(&padded[0..8])
}

/**
 *  Resident & Non Resident
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResidentData
{
  pub data : Vec<u8>,
}

impl ResidentData
{
  pub fn new(data : Vec<u8>) -> Self
  {
    ResidentData{ data }
  }

  pub fn len(&self) -> usize
  {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool
  {
    self.data.is_empty()
  }
}

impl fmt::Display for ResidentData
{
  fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result
  {
    let hex : Vec<String> = self.data.iter().map(|byte| format!("{:02X}", byte)).collect();
    write!(f, "Data: {}", hex.join("-"))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataRun
{
  /// `lcn` is absolute, already resolved from the chain of deltas.
  Data{ lcn : u64, length : u64 },
  Sparse{ length : u64 },
}

impl DataRun
{
  pub fn length(&self) -> u64
  {
    match self
    {
      DataRun::Data{ length, .. } | DataRun::Sparse{ length } => *length,
    }
  }
}

pub const NON_RESIDENT_HEADER_SIZE : usize = 0x40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonResidentData
{
  pub vcn_start                : u64,
  pub vcn_end                  : u64,
  pub run_list_offset          : u16,
  pub compression_unit         : u16,
  pub content_allocated_size   : u64,
  pub content_actual_size      : u64,
  pub content_initialized_size : u64,
  pub runs                     : Vec<DataRun>,
}

impl NonResidentData
{
  /// `data` is the whole attribute record, common header included.
  pub fn new(data : &[u8]) -> Result<Self>
  {
    ensure_len(data, NON_RESIDENT_HEADER_SIZE, "Non resident attribute")?;

    let vcn_start = LittleEndian::read_u64(&data[0x10..0x18]);
    let vcn_end = LittleEndian::read_u64(&data[0x18..0x20]);
    let run_list_offset = LittleEndian::read_u16(&data[0x20..0x22]);
    let compression_unit = LittleEndian::read_u16(&data[0x22..0x24]);
    let content_allocated_size = LittleEndian::read_u64(&data[0x28..0x30]);
    let content_actual_size = LittleEndian::read_u64(&data[0x30..0x38]);
    let content_initialized_size = LittleEndian::read_u64(&data[0x38..0x40]);

    ensure_len(data, run_list_offset as usize, "Non resident run list")?;
    let runs = decode_runs(&data[run_list_offset as usize..])?;

    Ok(NonResidentData{
      vcn_start,
      vcn_end,
      run_list_offset,
      compression_unit,
      content_allocated_size,
      content_actual_size,
      content_initialized_size,
      runs,
    })
  }

  pub fn cluster_count(&self) -> u64
  {
    self.runs.iter().map(DataRun::length).sum()
  }
}

/// Decode a run list. Each run starts with a byte whose low nibble is the size
/// of the length field and high nibble the size of the offset field; offsets
/// are signed deltas from the previous run and a missing offset marks a sparse run.
pub fn decode_runs(data : &[u8]) -> Result<Vec<DataRun>>
{
  let mut runs = Vec::new();
  let mut cursor = 0;
  let mut previous_lcn : i64 = 0;

  while cursor < data.len()
  {
    let length_size = (data[cursor] & 0xf) as usize;
    let offset_size = (data[cursor] >> 4) as usize;
    if length_size == 0
    {
      break
    }
    if length_size > 8 || offset_size > 8
    {
      return Err(NtfsError::InvalidDataRun("field size larger than 8 bytes"))
    }
    cursor += 1;

    let end = cursor + length_size + offset_size;
    ensure_len(data, end, "Non resident run list")?;

    let length = pad_u64(&data[cursor..cursor + length_size]);
    cursor += length_size;

    if offset_size == 0
    {
      runs.push(DataRun::Sparse{ length });
      continue
    }

    let delta = pad_i64(&data[cursor..cursor + offset_size]);
    cursor += offset_size;

    previous_lcn = previous_lcn.checked_add(delta).ok_or(NtfsError::InvalidDataRun("cluster offset overflow"))?;
    if previous_lcn < 0
    {
      return Err(NtfsError::InvalidDataRun("negative cluster number"))
    }
    runs.push(DataRun::Data{ lcn : previous_lcn as u64, length });
  }

  Ok(runs)
}

impl fmt::Display for NonResidentData
{
  fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result
  {
    writeln!(f, "Starting Virtual Cluster #: 0x{:X}, Ending Virtual Cluster #: 0x{:X}, Allocated Size: 0x{:X}, Actual Size: 0x{:X}, Initialized Size: 0x{:X}",
             self.vcn_start, self.vcn_end, self.content_allocated_size, self.content_actual_size, self.content_initialized_size)?;
    write!(f, "Data Runs:")?;
    for run in self.runs.iter()
    {
      match run
      {
        DataRun::Data{ lcn, length } => write!(f, "\nCluster Offset: 0x{:X} # Clusters: 0x{:X}", lcn, length)?,
        DataRun::Sparse{ length } => write!(f, "\nSparse # Clusters: 0x{:X}", length)?,
      }
    }
    Ok(())
  }
}
