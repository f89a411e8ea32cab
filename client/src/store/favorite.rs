//! Optimistic favorite toggle.
//!
//! A toggle starts [`TogglePhase::Speculative`]: the flipped value is already
//! written into every local copy of the article. It ends either
//! [`TogglePhase::Confirmed`] (copies overwritten with the server's article)
//! or [`TogglePhase::RolledBack`] (copies restored to the values they held
//! before the toggle).

use posts_shared::Article;

use super::PostsState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TogglePhase {
    Speculative,
    Confirmed,
    RolledBack,
}

/// `favorited` / `favorites_count` of one copy before it was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteMark {
    pub favorited: bool,
    pub favorites_count: u32,
}

impl FavoriteMark {
    fn of(article: &Article) -> Self {
        Self {
            favorited: article.favorited,
            favorites_count: article.favorites_count,
        }
    }

    fn apply(self, article: &mut Article) {
        article.favorited = self.favorited;
        article.favorites_count = self.favorites_count;
    }
}

/// Which copies of the article a toggle wrote to, with their prior values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchedCopies {
    pub list: Option<FavoriteMark>,
    pub current: Option<FavoriteMark>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    slug: String,
    desired: FavoriteMark,
    touched: TouchedCopies,
    phase: TogglePhase,
}

impl FavoriteToggle {
    /// Flip the article in place. Returns `None` when neither the list nor
    /// `current` holds `slug`.
    ///
    /// The flip is computed from `current` when it holds the article,
    /// otherwise from the list entry, and the same value is written to both.
    pub fn begin(state: &mut PostsState, slug: &str) -> Option<Self> {
        let touched = TouchedCopies {
            list: state
                .articles
                .iter()
                .find(|article| article.slug == slug)
                .map(FavoriteMark::of),
            current: state
                .current
                .as_ref()
                .filter(|article| article.slug == slug)
                .map(FavoriteMark::of),
        };
        let source = state
            .current
            .as_ref()
            .filter(|article| article.slug == slug)
            .or_else(|| state.articles.iter().find(|article| article.slug == slug))?;

        let (favorited, favorites_count) = source.toggled_favorite();
        let toggle = Self {
            slug: slug.to_string(),
            desired: FavoriteMark {
                favorited,
                favorites_count,
            },
            touched,
            phase: TogglePhase::Speculative,
        };
        toggle.for_each_copy(state, |article, _| toggle.desired.apply(article));
        Some(toggle)
    }

    /// Whether the server should be asked to favorite (`true`) or
    /// unfavorite (`false`).
    pub fn wants_favorite(&self) -> bool {
        self.desired.favorited
    }

    pub fn touched(&self) -> TouchedCopies {
        self.touched
    }

    pub fn phase(&self) -> TogglePhase {
        self.phase
    }

    /// Replace every local copy with the server's article.
    pub fn confirm(&mut self, state: &mut PostsState, server: &Article) {
        for article in state.articles.iter_mut().filter(|article| article.slug == self.slug) {
            *article = server.clone();
        }
        if let Some(current) = state.current.as_mut().filter(|article| article.slug == self.slug) {
            *current = server.clone();
        }
        self.phase = TogglePhase::Confirmed;
    }

    /// Put back the values each touched copy held before [`Self::begin`].
    pub fn roll_back(&mut self, state: &mut PostsState) {
        let touched = self.touched;
        self.for_each_copy(state, |article, in_list| {
            let before = if in_list { touched.list } else { touched.current };
            if let Some(mark) = before {
                mark.apply(article);
            }
        });
        self.phase = TogglePhase::RolledBack;
    }

    fn for_each_copy(&self, state: &mut PostsState, mut f: impl FnMut(&mut Article, bool)) {
        for article in state.articles.iter_mut().filter(|article| article.slug == self.slug) {
            f(article, true);
        }
        if let Some(current) = state.current.as_mut().filter(|article| article.slug == self.slug) {
            f(current, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::posts::tests::article;

    #[test]
    fn begin_touches_only_copies_that_exist() {
        let mut state = PostsState {
            articles: vec![article("a1", false, 2), article("a2", true, 5)],
            ..PostsState::default()
        };

        let toggle = FavoriteToggle::begin(&mut state, "a1").expect("a1 is listed");
        assert_eq!(toggle.touched().current, None);
        assert_eq!(toggle.touched().list, Some(FavoriteMark {
            favorited: false,
            favorites_count: 2,
        }));
        assert!(toggle.wants_favorite());
        assert_eq!(state.articles[0].favorites_count, 3);
        assert_eq!(state.articles[1].favorites_count, 5);

        assert!(FavoriteToggle::begin(&mut state, "missing").is_none());
    }

    #[test]
    fn roll_back_restores_each_copy_to_its_own_prior_value() {
        let mut state = PostsState {
            articles: vec![article("a1", false, 2)],
            current: Some(article("a1", false, 4)),
            ..PostsState::default()
        };

        let mut toggle = FavoriteToggle::begin(&mut state, "a1").expect("a1 is held");
        assert_eq!(state.articles[0].favorites_count, 5);
        assert_eq!(state.current.as_ref().map(|a| a.favorites_count), Some(5));

        toggle.roll_back(&mut state);
        assert_eq!(toggle.phase(), TogglePhase::RolledBack);
        assert_eq!(state.articles[0].favorites_count, 2);
        assert_eq!(state.current.as_ref().map(|a| a.favorites_count), Some(4));
        assert!(!state.articles[0].favorited);
    }

    #[test]
    fn confirm_overwrites_with_server_copy() {
        let mut state = PostsState {
            articles: vec![article("a1", false, 2)],
            current: Some(article("a1", false, 2)),
            ..PostsState::default()
        };
        let mut toggle = FavoriteToggle::begin(&mut state, "a1").expect("a1 is held");

        let server = article("a1", true, 10);
        toggle.confirm(&mut state, &server);

        assert_eq!(toggle.phase(), TogglePhase::Confirmed);
        assert_eq!(state.articles[0], server);
        assert_eq!(state.current.as_ref(), Some(&server));
    }
}
