//! Net Sizer Common Library
//!
//! 網戸の規格サイズ照合エンジンと、CLIと共有される型

pub mod units;
pub mod catalog;
pub mod exact;
pub mod closest;
pub mod limit;
pub mod product;
pub mod engine;
pub mod invoice;
pub mod session;
pub mod error;

pub use units::{normalize, round_to_nearest_half, CmSize, Length, NormalizedSize, Unit};
pub use catalog::{CatalogSummary, ColorCode, SizeCatalog, SizeRecord};
pub use exact::{find_exact, ExactMatch};
pub use closest::{find_closest, CandidateScorer, ClosestMatch, Score, ScoringPolicy, ToleranceWindow, UndersizePenalty};
pub use limit::{exceeds_limit, Envelope};
pub use product::{ColorOption, OrderSize, PriceSource, ProductLine, Wording};
pub use engine::{CatalogState, FitEngine, MatchResult, OpeningOutcome, OpeningRequest};
pub use invoice::{compute_invoice, parse_discount, round_amount, Invoice, InvoiceItem, InvoiceLine, PriceTable, PriceTier};
pub use session::{OrderLineItem, OrderSession};
pub use error::{Error, InvalidInput, Result};
