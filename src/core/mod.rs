pub mod decimal;
pub mod error;
pub mod i18n;

pub use decimal::DecimalFormat;
pub use error::{AppError, Result};
pub use i18n::Translator;
