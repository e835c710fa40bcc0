//! The geomark library for address list annotation.
//!
//! This library parses line-oriented lists of IP addresses and domain names
//! (with optional `#port` annotations) and resolves each one against a
//! geolocation HTTP API, producing records suitable for writing back out as
//! `address:port#CC Region` lines.
//!
//! # Examples
//!
//! Extracting entries from a list:
//!
//! ```rust
//! use geomark::Extractor;
//!
//! let extractor = Extractor::new("443").unwrap();
//! let entries = extractor
//!     .extract("// edge nodes\n1.2.3.4#8080\nexample.com\n".as_bytes())
//!     .unwrap();
//!
//! assert_eq!(entries.len(), 2);
//! assert_eq!(entries[0].address, "1.2.3.4");
//! assert_eq!(entries[0].port, "8080");
//! assert_eq!(entries[1].port, "443");
//! ```

pub mod error;
pub mod extractor;
pub mod input;
pub mod resolver;

pub use crate::error::Error;
pub use crate::extractor::{AddressEntry, Extractor};
pub use crate::resolver::{LocationRecord, Resolver};
