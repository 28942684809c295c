//! Shared helpers for case-insensitive search and sorting on list endpoints.

use db::models::{store, user};
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, IntoSimpleExpr, Order};
use strum::{Display, EnumString};

/// Lower-cases `term`, escapes LIKE wildcards and wraps it in `%…%`.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// `LOWER(col) LIKE pattern ESCAPE '\'`. `pattern` must come from [`like_pattern`].
pub fn contains_ci<C: ColumnTrait>(col: C, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(col.into_simple_expr())).like(LikeExpr::new(pattern).escape('\\'))
}

/// `LOWER(col)` for case-insensitive ordering.
pub fn lower<C: ColumnTrait>(col: C) -> SimpleExpr {
    SimpleExpr::from(Func::lower(col.into_simple_expr()))
}

/// Returns the trimmed term, or `None` if nothing is left to search for.
pub fn normalize_term(term: Option<&str>) -> Option<&str> {
    term.map(str::trim).filter(|t| !t.is_empty())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    #[strum(serialize = "ASC")]
    Asc,
    #[strum(serialize = "DESC")]
    Desc,
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Columns a store listing may be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreSortField {
    #[default]
    Name,
    Email,
    Address,
}

impl StoreSortField {
    pub fn column(self) -> store::Column {
        match self {
            StoreSortField::Name => store::Column::Name,
            StoreSortField::Email => store::Column::Email,
            StoreSortField::Address => store::Column::Address,
        }
    }
}

/// Columns the admin user listing may be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserSortField {
    #[default]
    Name,
    Email,
    Address,
    Role,
}

impl UserSortField {
    pub fn column(self) -> user::Column {
        match self {
            UserSortField::Name => user::Column::Name,
            UserSortField::Email => user::Column::Email,
            UserSortField::Address => user::Column::Address,
            UserSortField::Role => user::Column::Role,
        }
    }
}
