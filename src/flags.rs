//! Named bit-flag sets that keep the raw on-disk value.

use std::fmt;

use serde::ser::{Serialize, Serializer, SerializeStruct};

/// A bitflags type with a display name for every known bit.
pub trait NamedFlags : Copy + 'static
{
  /// Known bits in display order.
  const NAMES : &'static [(Self, &'static str)];

  fn to_bits(self) -> u32;
  fn from_bits_lossy(bits : u32) -> Self;
}

macro_rules! named_flags
{
  ($flags:ident, [$(($flag:ident, $name:expr)),* $(,)?]) =>
  {
    impl $crate::flags::NamedFlags for $flags
    {
      const NAMES : &'static [(Self, &'static str)] = &[$(($flags::$flag, $name)),*];

      fn to_bits(self) -> u32
      {
        self.bits()
      }

      fn from_bits_lossy(bits : u32) -> Self
      {
        $flags::from_bits_truncate(bits)
      }
    }
  }
}

/// Decoded flags alongside the raw value they came from.
/// Bits with no name are dropped from `flags` but stay in `raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagSet<F>
{
  raw : u32,
  flags : F,
}

impl<F : NamedFlags> FlagSet<F>
{
  pub fn from_raw(raw : u32) -> Self
  {
    FlagSet{ raw, flags : F::from_bits_lossy(raw) }
  }

  pub fn raw(&self) -> u32
  {
    self.raw
  }

  pub fn flags(&self) -> F
  {
    self.flags
  }

  pub fn contains(&self, flag : F) -> bool
  {
    let bits = flag.to_bits();
    self.raw & bits == bits
  }

  pub fn unknown_bits(&self) -> u32
  {
    self.raw & !self.flags.to_bits()
  }

  pub fn names(&self) -> Vec<&'static str>
  {
    F::NAMES.iter()
            .filter(|(flag, _)| flag.to_bits() != 0 && self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
  }
}

impl<F : NamedFlags> From<u32> for FlagSet<F>
{
  fn from(raw : u32) -> Self
  {
    FlagSet::from_raw(raw)
  }
}

impl<F : NamedFlags> fmt::Display for FlagSet<F>
{
  fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result
  {
    let names = self.names();
    if names.is_empty()
    {
      return f.write_str("None")
    }
    f.write_str(&names.join("|"))
  }
}

impl<F : NamedFlags> Serialize for FlagSet<F>
{
  fn serialize<S : Serializer>(&self, serializer : S) -> Result<S::Ok, S::Error>
  {
    let mut state = serializer.serialize_struct("FlagSet", 2)?;
    state.serialize_field("raw", &self.raw)?;
    state.serialize_field("names", &self.names())?;
    state.end()
  }
}
