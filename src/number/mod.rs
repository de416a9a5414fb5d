//! Locale-aware number formatting and parsing
//!
//! `NumberCodec` is the symmetric engine: everything it can format it can
//! parse back under the same locale. Formatting is infallible for valid
//! numeric input; parsing fails explicitly with offsets and never returns a
//! sentinel value.

mod format;
mod parse;

use crate::types::{FormatContext, SeparatorPolicy};

/// A number formatter/parser bound to one locale context.
#[derive(Debug, Clone)]
pub struct NumberCodec {
    context: FormatContext,
    separator_policy: SeparatorPolicy,
}

impl NumberCodec {
    pub fn new(context: FormatContext) -> Self {
        NumberCodec {
            context,
            separator_policy: SeparatorPolicy::default(),
        }
    }

    pub fn with_separator_policy(mut self, policy: SeparatorPolicy) -> Self {
        self.separator_policy = policy;
        self
    }

    pub fn context(&self) -> &FormatContext {
        &self.context
    }

    pub fn separator_policy(&self) -> SeparatorPolicy {
        if self.context.reject_group_separator {
            SeparatorPolicy::Reject
        } else {
            self.separator_policy
        }
    }
}
