//! Image assets and the load barrier
//!
//! All five images are requested at once. The barrier counts completions and
//! reports readiness exactly once; a single failure poisons it so the game
//! loop never starts on a half-loaded sprite set.

use thiserror::Error;

/// The images the presentation layer needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Background,
    /// Character standing / first walk frame
    CharacterIdle,
    /// Second walk frame
    CharacterStep,
    Floor,
    Explosion,
}

impl AssetKind {
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Background,
        AssetKind::CharacterIdle,
        AssetKind::CharacterStep,
        AssetKind::Floor,
        AssetKind::Explosion,
    ];

    /// Path relative to the page
    pub fn path(self) -> &'static str {
        match self {
            AssetKind::Background => "assets/gamebackground2.png",
            AssetKind::CharacterIdle => "assets/character1.png",
            AssetKind::CharacterStep => "assets/character2.png",
            AssetKind::Floor => "assets/lavafloor.png",
            AssetKind::Explosion => "assets/T-fireexplosion.png",
        }
    }

    fn index(self) -> usize {
        match self {
            AssetKind::Background => 0,
            AssetKind::CharacterIdle => 1,
            AssetKind::CharacterStep => 2,
            AssetKind::Floor => 3,
            AssetKind::Explosion => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("failed to load {kind:?} from `{path}`: {reason}")]
    LoadFailed {
        kind: AssetKind,
        path: &'static str,
        reason: String,
    },
    #[error("asset loading already failed on {0:?}")]
    Aborted(AssetKind),
}

/// Completion counter with a fire-once ready signal
#[derive(Debug, Clone, Default)]
pub struct LoadBarrier {
    loaded: [bool; AssetKind::ALL.len()],
    fired: bool,
    failed: Option<AssetKind>,
}

impl LoadBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an asset loaded
    ///
    /// Returns `Ok(true)` exactly once: on the completion that makes every
    /// asset ready. Repeated completions of the same asset are harmless.
    pub fn complete(&mut self, kind: AssetKind) -> Result<bool, AssetError> {
        if let Some(failed) = self.failed {
            return Err(AssetError::Aborted(failed));
        }
        self.loaded[kind.index()] = true;
        if self.fired || self.remaining() > 0 {
            return Ok(false);
        }
        self.fired = true;
        log::info!("All {} assets loaded", AssetKind::ALL.len());
        Ok(true)
    }

    /// Mark an asset failed; the barrier will never fire afterwards
    pub fn fail(&mut self, kind: AssetKind, reason: impl Into<String>) -> AssetError {
        if self.failed.is_none() {
            self.failed = Some(kind);
        }
        let err = AssetError::LoadFailed {
            kind,
            path: kind.path(),
            reason: reason.into(),
        };
        log::error!("{}", err);
        err
    }

    /// Assets still outstanding
    pub fn remaining(&self) -> usize {
        self.loaded.iter().filter(|done| !**done).count()
    }

    #[cfg(test)]
    fn is_ready(&self) -> bool {
        self.fired
    }

    #[cfg(test)]
    fn has_failed(&self) -> bool {
        self.failed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_all_five() {
        let mut barrier = LoadBarrier::new();
        assert_eq!(barrier.remaining(), 5);

        // Out of order, with a duplicate
        for kind in [
            AssetKind::Floor,
            AssetKind::Background,
            AssetKind::Floor,
            AssetKind::Explosion,
            AssetKind::CharacterStep,
        ] {
            assert_eq!(barrier.complete(kind), Ok(false));
        }
        assert_eq!(barrier.remaining(), 1);
        assert!(!barrier.is_ready());

        assert_eq!(barrier.complete(AssetKind::CharacterIdle), Ok(true));
        assert!(barrier.is_ready());

        // Late duplicates never fire again
        assert_eq!(barrier.complete(AssetKind::CharacterIdle), Ok(false));
    }

    #[test]
    fn test_failure_poisons_barrier() {
        let mut barrier = LoadBarrier::new();
        barrier.complete(AssetKind::Background).unwrap();

        let err = barrier.fail(AssetKind::Explosion, "404");
        assert_eq!(
            err,
            AssetError::LoadFailed {
                kind: AssetKind::Explosion,
                path: "assets/T-fireexplosion.png",
                reason: "404".to_string(),
            }
        );
        assert!(err.to_string().contains("T-fireexplosion.png"));
        assert!(barrier.has_failed());

        for kind in AssetKind::ALL {
            assert_eq!(barrier.complete(kind), Err(AssetError::Aborted(AssetKind::Explosion)));
        }
        assert!(!barrier.is_ready());
    }

    #[test]
    fn test_paths_are_distinct() {
        let mut paths: Vec<_> = AssetKind::ALL.iter().map(|k| k.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), AssetKind::ALL.len());
    }
}
