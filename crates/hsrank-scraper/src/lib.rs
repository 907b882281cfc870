pub mod artifacts;
pub mod error;
pub mod ranking;
pub mod retry;
pub mod session;
pub mod types;

pub use error::ScrapeError;
pub use thirtyfour::WebDriver;
pub use ranking::fetch_ranking;
pub use session::{build_driver, login_with_retries};
pub use types::{row_from_cells, RankingRow, RANKING_HEADER};
