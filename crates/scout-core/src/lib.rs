pub mod criteria;
pub mod error;
pub mod export;
pub mod normalize;
pub mod present;
pub mod presets;
pub mod query;
pub mod record;
pub mod search;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use criteria::{DatePosted, EmploymentType, SearchCriteria};
pub use error::AppError;
pub use export::{EXPORT_COLUMNS, export_csv};
pub use normalize::{NormalizedResponse, normalize};
pub use present::render;
pub use presets::Preset;
pub use query::{ParameterSet, build_params};
pub use record::{JobField, JobRecord};
pub use search::SearchService;
pub use traits::JobSearchClient;
