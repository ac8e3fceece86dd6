//! Module: settings
//! Responsibility: reusable builder defaults loaded from configuration.
//! Does not own: configuration file discovery or environment lookup.
//! Boundary: applied through a decorator's own chainable setters.

use crate::{
    decorator::CriteriaDecorator,
    error::CriteriaError,
    mode::{CacheMode, FlushMode},
};
use serde::{Deserialize, Serialize};

///
/// CriteriaSettings
///
/// Builder defaults shared by many queries. Absent fields are left alone
/// when applied.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CriteriaSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cacheable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_mode: Option<CacheMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flush_mode: Option<FlushMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CriteriaSettings {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply every present field to `decorator`, stopping at the first error.
    pub fn apply<'d, D: CriteriaDecorator>(
        &self,
        decorator: &'d mut D,
    ) -> Result<&'d mut D, CriteriaError> {
        let mut decorator = decorator;

        if let Some(fetch_size) = self.fetch_size {
            decorator = decorator.set_fetch_size(fetch_size)?;
        }
        if let Some(timeout) = self.timeout {
            decorator = decorator.set_timeout(timeout)?;
        }
        if let Some(cacheable) = self.cacheable {
            decorator = decorator.set_cacheable(cacheable)?;
        }
        if let Some(region) = &self.cache_region {
            decorator = decorator.set_cache_region(region)?;
        }
        if let Some(mode) = self.cache_mode {
            decorator = decorator.set_cache_mode(mode)?;
        }
        if let Some(mode) = self.flush_mode {
            decorator = decorator.set_flush_mode(mode)?;
        }
        if let Some(read_only) = self.read_only {
            decorator = decorator.set_read_only(read_only)?;
        }
        if let Some(comment) = &self.comment {
            decorator = decorator.set_comment(comment)?;
        }

        Ok(decorator)
    }
}

///
/// TESTS
///
