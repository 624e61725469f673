use std::sync::atomic::{AtomicUsize, Ordering};

/// Transient "operation in flight" flag shown by auth screens.
///
/// Counts overlapping operations so the flag only clears when the last one
/// finishes.
#[derive(Debug, Default)]
pub struct LoadingFlag {
    in_flight: AtomicUsize,
}

impl LoadingFlag {
    pub fn begin(&self) -> LoadingGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        LoadingGuard { flag: self }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

/// Clears its share of the loading flag when dropped, on every exit path.
#[must_use = "the loading flag clears as soon as the guard is dropped"]
pub struct LoadingGuard<'a> {
    flag: &'a LoadingFlag,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_tracks_overlapping_guards() {
        let flag = LoadingFlag::default();
        assert!(!flag.is_loading());
        let first = flag.begin();
        let second = flag.begin();
        drop(first);
        assert!(flag.is_loading());
        drop(second);
        assert!(!flag.is_loading());
    }

    #[test]
    fn flag_clears_on_early_return() {
        fn fails(flag: &LoadingFlag) -> Result<(), ()> {
            let _guard = flag.begin();
            Err(())
        }

        let flag = LoadingFlag::default();
        assert!(fails(&flag).is_err());
        assert!(!flag.is_loading());
    }
}
