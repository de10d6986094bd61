use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{TimeError, TimeResult};
use crate::instant::Instant;

/// Reads the system clock as an [`Instant`].
pub(crate) fn system_instant() -> TimeResult<Instant> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TimeError::unknown().with_message("system clock reads before the Unix epoch"))?;
    i64::try_from(since_epoch.as_nanos())
        .map(Instant::from_nanoseconds)
        .map_err(|_| {
            TimeError::unknown().with_message("system clock exceeds the representable range")
        })
}
