use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::error::{Result, ensure_len};
use crate::flags::FlagSet;
use crate::attributes::IndexNodeFlags;

pub const INDEX_NODE_HEADER_SIZE : usize = 16;
/// Offset of the node header inside $INDEX_ROOT content.
pub const INDEX_ROOT_NODE_HEADER_OFFSET : usize = 0x10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexNodeHeader
{
  pub index_values_offset : u32,
  pub index_node_size : u32,
  pub allocated_index_node_size : u32,
  pub flags : FlagSet<IndexNodeFlags>,
}

impl IndexNodeHeader
{
  pub fn new(data : &[u8]) -> Result<Self>
  {
    ensure_len(data, INDEX_NODE_HEADER_SIZE, "IndexNodeHeader")?;

    Ok(IndexNodeHeader{
      index_values_offset : LittleEndian::read_u32(&data[0..4]),
      index_node_size : LittleEndian::read_u32(&data[4..8]),
      allocated_index_node_size : LittleEndian::read_u32(&data[8..12]),
      flags : FlagSet::from_raw(LittleEndian::read_u32(&data[12..16])),
    })
  }

  pub fn has_index_allocation(&self) -> bool
  {
    self.flags.contains(IndexNodeFlags::HAS_INDEX_ALLOCATION)
  }
}

impl fmt::Display for IndexNodeHeader
{
  fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result
  {
    write!(f, "Index Values Offset: 0x{:X} Index Node Size: 0x{:X} Allocated Index Node Size: 0x{:X} Index Node Flags: {}",
           self.index_values_offset, self.index_node_size, self.allocated_index_node_size, self.flags)
  }
}
