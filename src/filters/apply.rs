use super::ast::{FieldFilter, FilterExpr, FilterField, FilterOperator};
use crate::models::{Category, SearchMatch};

/// Keep the matches that satisfy `filter`, preserving their order
///
/// Filter logic:
/// - Same-field OR: category:overview category:timeline → (overview OR timeline)
/// - Cross-field AND: category:timeline character:aria → (timeline AND aria)
/// - Explicit operators override defaults
///
/// Operators are applied left to right with no precedence.
pub fn apply_filters(matches: Vec<SearchMatch>, filter: &FilterExpr) -> Vec<SearchMatch> {
    if filter.is_empty() {
        return matches;
    }

    matches.into_iter().filter(|m| evaluate_filter(m, filter)).collect()
}

/// Borrowing variant of [`apply_filters`] for callers that keep the full result list
pub fn filter_matches<'a>(matches: &'a [SearchMatch], filter: &FilterExpr) -> Vec<&'a SearchMatch> {
    matches.iter().filter(|m| evaluate_filter(m, filter)).collect()
}

fn evaluate_filter(m: &SearchMatch, filter: &FilterExpr) -> bool {
    let Some((first, rest)) = filter.filters.split_first() else {
        return true;
    };

    let mut result = evaluate_field_filter(m, first);
    for (operator, next) in filter.operators.iter().zip(rest) {
        let next_result = evaluate_field_filter(m, next);
        result = match operator {
            FilterOperator::And => result && next_result,
            FilterOperator::Or => result || next_result,
        };
    }

    result
}

fn evaluate_field_filter(m: &SearchMatch, filter: &FieldFilter) -> bool {
    match filter.field {
        FilterField::Category => match_category(m, &filter.value),
        FilterField::Character => contains_ignore_case(&m.character_name, &filter.value),
        FilterField::Field => contains_ignore_case(&m.field, &filter.value),
    }
}

/// Unknown category names never match
fn match_category(m: &SearchMatch, value: &str) -> bool {
    value.parse::<Category>().is_ok_and(|category| category == m.category)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Snippet;

    fn create_test_match(name: &str, category: Category, field: &str) -> SearchMatch {
        SearchMatch {
            character_id: name.to_lowercase(),
            character_name: name.to_string(),
            category,
            field: field.to_string(),
            value: "storm".to_string(),
            snippet: Snippet { matched: "storm".to_string(), ..Snippet::default() },
            match_text: "storm".to_string(),
        }
    }

    fn sample() -> Vec<SearchMatch> {
        vec![
            create_test_match("Aria Stormwind", Category::Overview, "Name"),
            create_test_match("Aria Stormwind", Category::Timeline, "Tag"),
            create_test_match("Bram Ironhand", Category::Biography, "Background"),
            create_test_match("Bram Ironhand", Category::Timeline, "1203"),
        ]
    }

    #[test]
    fn test_apply_filters_empty() {
        let result = apply_filters(sample(), &FilterExpr::new());
        assert_eq!(result, sample());
    }

    #[test]
    fn test_match_category() {
        let m = create_test_match("Aria", Category::Relationships, "Ally");
        assert!(match_category(&m, "relationships"));
        assert!(match_category(&m, "RELATIONSHIPS"));
        assert!(!match_category(&m, "timeline"));
        assert!(!match_category(&m, "inventory"));
    }

    #[test]
    fn test_match_character_substring() {
        let m = create_test_match("Aria Stormwind", Category::Overview, "Name");
        let filter = FieldFilter::new(FilterField::Character, "STORM");
        assert!(evaluate_field_filter(&m, &filter));
        let filter = FieldFilter::new(FilterField::Character, "bram");
        assert!(!evaluate_field_filter(&m, &filter));
    }

    #[test]
    fn test_match_field_label() {
        let m = create_test_match("Aria", Category::Timeline, "Tag");
        assert!(evaluate_field_filter(&m, &FieldFilter::new(FilterField::Field, "tag")));
        assert!(!evaluate_field_filter(&m, &FieldFilter::new(FilterField::Field, "name")));
    }

    #[test]
    fn test_evaluate_and_operator() {
        let mut filter = FilterExpr::new();
        filter.add_filter(FieldFilter::new(FilterField::Category, "timeline"));
        filter.add_operator(FilterOperator::And);
        filter.add_filter(FieldFilter::new(FilterField::Character, "bram"));

        let result = apply_filters(sample(), &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].field, "1203");
    }

    #[test]
    fn test_evaluate_or_operator() {
        let mut filter = FilterExpr::new();
        filter.add_filter(FieldFilter::new(FilterField::Category, "overview"));
        filter.add_operator(FilterOperator::Or);
        filter.add_filter(FieldFilter::new(FilterField::Category, "biography"));

        let fields: Vec<String> =
            apply_filters(sample(), &filter).into_iter().map(|m| m.field).collect();
        assert_eq!(fields, vec!["Name", "Background"]);
    }

    #[test]
    fn test_evaluate_left_to_right() {
        // (overview OR biography) AND aria
        let mut filter = FilterExpr::new();
        filter.add_filter(FieldFilter::new(FilterField::Category, "overview"));
        filter.add_operator(FilterOperator::Or);
        filter.add_filter(FieldFilter::new(FilterField::Category, "biography"));
        filter.add_operator(FilterOperator::And);
        filter.add_filter(FieldFilter::new(FilterField::Character, "aria"));

        let result = apply_filters(sample(), &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].field, "Name");
    }

    #[test]
    fn test_filter_matches_borrows() {
        let all = sample();
        let mut filter = FilterExpr::new();
        filter.add_filter(FieldFilter::new(FilterField::Character, "aria"));

        let kept = filter_matches(&all, &filter);
        assert_eq!(kept.len(), 2);
        assert!(std::ptr::eq(kept[0], &all[0]));
    }
}
