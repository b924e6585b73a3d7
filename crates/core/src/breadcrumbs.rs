//! Breadcrumb trails with per-path label overrides.
//!
//! Pages that know a nicer label than the URL segment (a clinic's name instead of `c1`)
//! register an override for their path. The registry is an owned object, shared by `Arc`
//! between the pages that use it; nothing here is global.
//!
//! Overrides are last-writer-wins. Each writer holds an [`OverrideGuard`]; dropping it removes
//! the override only if no later writer has replaced it.

use crate::constants::HOME_LABEL;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub href: String,
    pub label: String,
    pub current: bool,
}

#[derive(Debug, Default)]
struct Overrides {
    labels: HashMap<String, (u64, String)>,
    next_token: u64,
}

#[derive(Debug, Default)]
pub struct BreadcrumbRegistry {
    inner: RwLock<Overrides>,
}

impl BreadcrumbRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register `label` for `path`, replacing any earlier override.
    #[must_use = "dropping the guard removes the override immediately"]
    pub fn set_override(self: &Arc<Self>, path: &str, label: impl Into<String>) -> OverrideGuard {
        let path = normalise_path(path);
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let token = inner.next_token;
        inner.next_token += 1;
        inner.labels.insert(path.clone(), (token, label.into()));

        OverrideGuard {
            registry: Arc::clone(self),
            path,
            token,
        }
    }

    pub fn label_for(&self, path: &str) -> Option<String> {
        let path = normalise_path(path);
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.labels.get(&path).map(|(_, label)| label.clone())
    }

    /// Remove whatever override `path` has, regardless of who set it.
    pub fn remove(&self, path: &str) -> bool {
        let path = normalise_path(path);
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.labels.remove(&path).is_some()
    }

    fn release(&self, path: &str, token: u64) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.labels.get(path).is_some_and(|(owner, _)| *owner == token) {
            inner.labels.remove(path);
        }
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build the trail for `path`, from `Home` to the page itself.
    ///
    /// `/clinics/c1/edit` yields `Home`, `Clinics`, `C1`, `Edit` with hrefs `/`, `/clinics`,
    /// `/clinics/c1`, `/clinics/c1/edit`. Query strings and fragments are ignored.
    pub fn build_trail(&self, path: &str) -> Vec<Breadcrumb> {
        let path = normalise_path(path);
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let label_of = |href: &str, fallback: String| {
            inner
                .labels
                .get(href)
                .map(|(_, label)| label.clone())
                .unwrap_or(fallback)
        };

        let mut trail = vec![Breadcrumb {
            href: "/".to_string(),
            label: label_of("/", HOME_LABEL.to_string()),
            current: false,
        }];

        let mut href = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            href.push('/');
            href.push_str(segment);
            trail.push(Breadcrumb {
                href: href.clone(),
                label: label_of(&href, humanise(segment)),
                current: false,
            });
        }

        if let Some(last) = trail.last_mut() {
            last.current = true;
        }
        trail
    }
}

/// Removes its override on drop, unless a later writer replaced it.
#[derive(Debug)]
pub struct OverrideGuard {
    registry: Arc<BreadcrumbRegistry>,
    path: String,
    token: u64,
}

impl OverrideGuard {
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Drop for OverrideGuard {
    fn drop(&mut self) {
        self.registry.release(&self.path, self.token);
    }
}

/// `/Clinics//c1/?tab=x#top` -> `/Clinics/c1`. The root stays `/`.
fn normalise_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// `lab-tests` -> `Lab Tests`.
fn humanise(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
