//! # Health Check Workbook
//!
//! Turns an uploaded spreadsheet into a [`Workbook`](healthcheck_core::Workbook)
//! and decides which table the rest of the pipeline works on.
//!
//! - [`reader`]: parses `.xlsx`/`.xls`/`.xlsb`/`.ods` bytes into named tables and
//!   extracts the `Meta` marker string
//! - [`detect`]: classifies the document into a [`TemplateKind`](healthcheck_core::TemplateKind)
//! - [`resolve`]: finds the positions sheet for a kind, separating "missing"
//!   from "present but empty"
//!
//! ```rust,ignore
//! use healthcheck_workbook::{detect_template, read_workbook, resolve_sheet, SheetResolution};
//!
//! let loaded = read_workbook(&bytes)?;
//! let kind = detect_template(&loaded.workbook, loaded.metadata.as_deref());
//! match resolve_sheet(&loaded.workbook, kind)? {
//!     SheetResolution::Found { name, table } => { /* validate */ }
//!     SheetResolution::Empty(warning) => eprintln!("{warning}"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod detect;
pub mod error;
pub mod reader;
pub mod resolve;

pub use detect::{detect, detect_template, Detection, DetectionSource};
pub use error::{WorkbookError, WorkbookResult};
pub use reader::{read_workbook, read_workbook_path, LoadedWorkbook, META_SHEET};
pub use resolve::{resolve_sheet, EmptySheetWarning, SheetResolution};
