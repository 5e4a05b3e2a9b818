pub mod criteria;
pub mod entry;
pub mod grouping;
pub mod nearest;
pub mod primitives;
pub mod scale;
pub mod scenes;
pub mod stack;
pub mod types;

pub use criteria::FilterCriteria;
pub use entry::{Tier, TopEarnerRow, TopEarnerTable, TournamentEntry};
pub use grouping::{
    EntryIndex, Group, NestedGroups, by_count_descending, by_date_ascending, filter_by_ids,
    group_by_keys, nest_and_sort,
};
pub use nearest::{bisect_left_by, nearest_by};
pub use scale::{BandScale, LinearScale, TimeScale};
pub use scenes::{PlayerCounts, SCENE_TITLES, curated_scenes};
pub use stack::{StackSegment, StackedSeries, stack_extent, stack_series};
pub use types::{ChartDimensions, Margins, Viewport};
