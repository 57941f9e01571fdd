//! Decode NTFS MFT attribute records into typed values.
//!
//! Each decoder takes the raw bytes of one attribute record and returns an
//! immutable value: `StandardInformation`, `Data` or `IndexNodeHeader`.
//! Structural damage is reported as `NtfsError::TruncatedRecord` for that record
//! only; timestamps that can't be represented are logged and read as absent.
//!
//! ```
//! use ntfs_attributes::attributes::index::IndexNodeHeader;
//!
//! let header = IndexNodeHeader::new(&[0x00, 0x02, 0, 0, 0x30, 0, 0, 0, 0x40, 0, 0, 0, 0x01, 0, 0, 0]).unwrap();
//! assert_eq!(header.index_values_offset, 0x200);
//! assert!(header.has_index_allocation());
//! ```

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;

#[macro_use]
pub mod flags;
pub mod error;
pub mod timestamp;
pub mod attribute;
pub mod attributecontent;
pub mod attributes;
pub mod ntfsattributes;

pub use crate::error::{NtfsError, Result};
pub use crate::flags::FlagSet;
pub use crate::attribute::{AttributeHeader, AttributeRecords, Residency, resident_content};
pub use crate::attributecontent::{ResidentData, NonResidentData, DataRun};
pub use crate::attributes::{FileAttributes, StandardFlags, IndexNodeFlags};
pub use crate::attributes::standard::StandardInformation;
pub use crate::attributes::data::{Data, DataContent};
pub use crate::attributes::index::IndexNodeHeader;
pub use crate::ntfsattributes::{NtfsAttribute, NtfsAttributes, NtfsAttributeType, decode_records};
