pub mod decimation;
pub mod point_store;
pub mod primitives;
pub mod raw_point;
pub mod scale;
pub mod series;
pub mod time_codec;
pub mod types;
pub mod viewport;

pub use decimation::{DecimationMode, decimate_indices};
pub use point_store::{MergeReport, Point, PointStore};
pub use primitives::{nice_step, quantize_time};
pub use raw_point::{RawPoint, RawTime, RawValue};
pub use scale::LinearScale;
pub use series::{LegendEntry, Series, SeriesConfig, SeriesId, SeriesPatch, SeriesRegistry};
pub use time_codec::{format_time, format_value, parse_time, parse_value};
pub use types::{DataBounds, ScreenPoint, SurfaceSize, WorldPoint};
pub use viewport::{ScaleBounds, Viewport};
