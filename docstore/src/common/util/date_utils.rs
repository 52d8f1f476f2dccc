use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

#[inline]
pub fn get_current_time() -> Result<u64, SystemTimeError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
}

// Fast path: returns 0 on any error instead of double error handling
#[inline]
pub fn get_current_time_or_zero() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_current_time() {
        let current_time = get_current_time_or_zero();
        assert!(current_time > 0);
    }

    #[test]
    fn test_get_current_time_result_ok() {
        let result = get_current_time();
        assert!(result.is_ok());
        assert!(result.unwrap() > 0);
    }

    #[test]
    fn test_time_is_monotonic_enough() {
        let first = get_current_time_or_zero();
        let second = get_current_time_or_zero();
        assert!(second >= first);
    }
}
