/// Fields a match filter can test
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterField {
    /// Match category (overview, biography, relationships, timeline)
    Category,
    /// Character name (case-insensitive substring)
    Character,
    /// Field label such as Name, Background or Tag (case-insensitive substring)
    Field,
}

/// Logical operators for combining filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOperator {
    /// Both conditions must match (default between different fields)
    And,
    /// Either condition matches (default within same field)
    Or,
}

/// Single field:value filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: FilterField,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: FilterField, value: impl Into<String>) -> Self {
        Self { field, value: value.into() }
    }
}

/// Filter expression combining field filters with operators, evaluated left to right
///
/// - Same-field filters are OR'd together: category:overview category:timeline
/// - Cross-field filters are AND'd together: category:timeline character:aria
/// - Explicit operators override defaults
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterExpr {
    pub filters: Vec<FieldFilter>,
    pub operators: Vec<FilterOperator>,
}

impl FilterExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(&mut self, filter: FieldFilter) {
        self.filters.push(filter);
    }

    pub fn add_operator(&mut self, operator: FilterOperator) {
        self.operators.push(operator);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
