use std::str::FromStr;

use url::Url;

use super::common::{Query, QueryCommon, SortDirection};

/// Query builder shared by every Fiscal Data dataset endpoint.
///
/// The service exposes one uniform grammar across datasets: `fields=` (a
/// comma-joined projection), `filter=` (comma-joined `field:op:value` terms),
/// `sort=` (comma-joined keys, descending keys prefixed with `-`), and the
/// bracketed pagination parameters. The default query carries only the
/// pagination suffix.
#[derive(Default)]
pub struct DatasetQuery {
    pub common: QueryCommon,
    pub fields: Vec<String>,
    pub filters: Vec<FieldFilter>,
    pub sort: Vec<SortKey>,
}

impl Query for DatasetQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if !self.fields.is_empty() {
            url.query_pairs_mut()
                .append_pair("fields", self.fields.join(",").as_str());
        }
        if !self.filters.is_empty() {
            let terms: Vec<String> = self.filters.iter().map(|f| f.to_string()).collect();
            url.query_pairs_mut()
                .append_pair("filter", terms.join(",").as_str());
        }
        if !self.sort.is_empty() {
            let keys: Vec<String> = self.sort.iter().map(|k| k.to_string()).collect();
            url.query_pairs_mut()
                .append_pair("sort", keys.join(",").as_str());
        }
        url
    }
}

impl DatasetQuery {
    pub fn with_field(mut self, field: &str) -> Self {
        self.fields.push(field.to_string());
        self
    }
    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    pub fn with_filter(mut self, filter: FieldFilter) -> Self {
        self.filters.push(filter);
        self
    }
    pub fn with_filters(mut self, filters: &[FieldFilter]) -> Self {
        self.filters.extend_from_slice(filters);
        self
    }

    pub fn with_sort(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort.push(SortKey {
            field: field.to_string(),
            direction,
        });
        self
    }
}

/// One `field:op:value` filter term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub op: FilterOp,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: &str, op: FilterOp, value: &str) -> Self {
        Self {
            field: field.to_string(),
            op,
            value: value.to_string(),
        }
    }

    /// Exact equality, the most common term.
    pub fn eq(field: &str, value: &str) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }
    pub fn lt(field: &str, value: &str) -> Self {
        Self::new(field, FilterOp::Lt, value)
    }
    pub fn lte(field: &str, value: &str) -> Self {
        Self::new(field, FilterOp::Lte, value)
    }
    pub fn gt(field: &str, value: &str) -> Self {
        Self::new(field, FilterOp::Gt, value)
    }
    pub fn gte(field: &str, value: &str) -> Self {
        Self::new(field, FilterOp::Gte, value)
    }

    /// Membership, rendered as `field:in:(a,b,c)`.
    pub fn one_of(field: &str, values: &[&str]) -> Self {
        Self::new(field, FilterOp::In, format!("({})", values.join(",")).as_str())
    }
}

impl std::fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.field, self.op, self.value)
    }
}

/// Filter operators accepted by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FilterOp::Eq => "eq",
                FilterOp::Lt => "lt",
                FilterOp::Lte => "lte",
                FilterOp::Gt => "gt",
                FilterOp::Gte => "gte",
                FilterOp::In => "in",
            }
        )?;
        Ok(())
    }
}

impl FromStr for FilterOp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(FilterOp::Eq),
            "lt" => Ok(FilterOp::Lt),
            "lte" => Ok(FilterOp::Lte),
            "gt" => Ok(FilterOp::Gt),
            "gte" => Ok(FilterOp::Gte),
            "in" => Ok(FilterOp::In),
            _ => Err(()),
        }
    }
}

/// One sort key; descending keys render with a `-` prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            match self.direction {
                SortDirection::Asc => "",
                SortDirection::Desc => "-",
            },
            self.field
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{DatasetQuery, FieldFilter, Query, SortDirection};

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_default_query_renders_pagination_suffix() {
        let url = Url::parse("https://example.com/api").unwrap();
        let url = DatasetQuery::default().add_to_url(&url);

        assert_eq!(
            pairs(&url),
            vec![
                ("page[number]".to_string(), "1".to_string()),
                ("page[size]".to_string(), "10000".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_overrides() {
        let url = Url::parse("https://example.com/api").unwrap();
        let url = DatasetQuery::default()
            .with_page(3)
            .with_page_size(50)
            .add_to_url(&url);

        assert_eq!(
            pairs(&url),
            vec![
                ("page[number]".to_string(), "3".to_string()),
                ("page[size]".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_fields_render_comma_joined() {
        let url = Url::parse("https://example.com/api").unwrap();
        let url = DatasetQuery::default()
            .with_fields(&["record_date", "security_desc"])
            .with_field("avg_interest_rate_amt")
            .add_to_url(&url);

        assert!(pairs(&url).contains(&(
            "fields".to_string(),
            "record_date,security_desc,avg_interest_rate_amt".to_string()
        )));
    }

    #[test]
    fn test_filters_render_as_one_parameter() {
        let url = Url::parse("https://example.com/api").unwrap();
        let url = DatasetQuery::default()
            .with_filter(FieldFilter::eq("security_desc", "Treasury Bonds"))
            .with_filter(FieldFilter::gte("record_calendar_year", "2001"))
            .add_to_url(&url);

        assert!(pairs(&url).contains(&(
            "filter".to_string(),
            "security_desc:eq:Treasury Bonds,record_calendar_year:gte:2001".to_string()
        )));
    }

    #[test]
    fn test_one_of_renders_parenthesized_list() {
        let filter = FieldFilter::one_of("record_calendar_year", &["2001", "2002"]);
        assert_eq!(filter.to_string(), "record_calendar_year:in:(2001,2002)");
    }

    #[test]
    fn test_sort_keys_prefix_descending_fields() {
        let url = Url::parse("https://example.com/api").unwrap();
        let url = DatasetQuery::default()
            .with_sort("record_date", SortDirection::Desc)
            .with_sort("src_line_nbr", SortDirection::Asc)
            .add_to_url(&url);

        assert!(pairs(&url).contains(&("sort".to_string(), "-record_date,src_line_nbr".to_string())));
    }
}
