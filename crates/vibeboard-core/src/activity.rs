//! Hour-of-day activity histogram.

use chrono::{FixedOffset, Timelike};
use serde::Serialize;

use crate::post::Post;

/// Number of hourly buckets in a histogram.
pub const HOURS_PER_DAY: usize = 24;

/// Post count for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityBucket {
    /// Hour of day in `[0, 23]`.
    pub hour: u8,
    pub count: usize,
}

/// Fixed 24-slot histogram of posts by local hour of day.
///
/// All 24 buckets always exist, in hour order, even when their count is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyActivity {
    buckets: [ActivityBucket; HOURS_PER_DAY],
}

impl HourlyActivity {
    /// A histogram with every bucket at zero.
    #[must_use]
    pub fn empty() -> Self {
        // `hour` < 24, so the cast is lossless.
        #[allow(clippy::cast_possible_truncation)]
        let buckets = std::array::from_fn(|hour| ActivityBucket {
            hour: hour as u8,
            count: 0,
        });
        Self { buckets }
    }

    /// Counts `posts` by the hour their `date` falls in at `offset`.
    ///
    /// Single pass, independent of input order.
    #[must_use]
    pub fn from_posts(posts: &[Post], offset: FixedOffset) -> Self {
        let mut activity = Self::empty();
        for post in posts {
            let hour = post.date.with_timezone(&offset).hour() as usize;
            activity.buckets[hour].count += 1;
        }
        activity
    }

    #[must_use]
    pub fn buckets(&self) -> &[ActivityBucket; HOURS_PER_DAY] {
        &self.buckets
    }

    /// Count for `hour`, or `None` if `hour` is not in `[0, 23]`.
    #[must_use]
    pub fn count_at(&self, hour: usize) -> Option<usize> {
        self.buckets.get(hour).map(|b| b.count)
    }

    /// Sum of all bucket counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// The earliest hour holding the highest count; `None` when there are no posts.
    #[must_use]
    pub fn peak(&self) -> Option<ActivityBucket> {
        self.buckets
            .iter()
            .filter(|b| b.count > 0)
            .fold(None, |best: Option<ActivityBucket>, b| match best {
                Some(best) if best.count >= b.count => Some(best),
                _ => Some(*b),
            })
    }
}

impl Default for HourlyActivity {
    fn default() -> Self {
        Self::empty()
    }
}
