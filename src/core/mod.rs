pub mod page;
pub mod roi;
pub mod text;

pub use crate::domain::model::{Locale, RoiForm, RoiInputs, RoiResult, SectorRow};
pub use crate::domain::ports::{Storage, TranslationProvider};
pub use crate::utils::error::Result;
pub use page::{PageModel, PageRequest, PageService};
pub use roi::{RoiAssumptions, RoiCalculator};
pub use text::{TextResolver, TranslationTable};
