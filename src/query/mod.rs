mod collate;
mod filter;
mod related;

pub use self::{
    collate::locale_cmp,
    filter::{FilterSpec, SortDirection, SortField, apply},
    related::{RELATED_LIMIT, related},
};
