//! HTML parser for the CoolPC evaluation page.

use crate::coolpc::models::{Criteria, Item};
use crate::coolpc::selectors;
use regex::Regex;
use scraper::{ElementRef, Html, Node};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Option text pattern: `<name>, $<price> <anything>`.
static NAME_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*), \$(\d+) .*$").unwrap());

/// Extracts the items matching `criteria` from the evaluation page.
///
/// The category is located by exact text match; its table row is scanned
/// for `<optgroup>`s in document order. The group labelled with the
/// subcategory contributes the items; the group immediately after it is the
/// trailing accessories group, whose items are subtracted from the result
/// by structural equality. A missing category or subcategory yields an
/// empty list rather than an error.
pub fn parse(document: &str, criteria: &Criteria) -> Vec<Item> {
    let html = Html::parse_document(document);

    let Some(row) = find_category_row(&html, &criteria.category) else {
        debug!("Category {:?} not found in document", criteria.category);
        return Vec::new();
    };

    let mut items: Vec<Item> = Vec::new();
    let mut extras: Vec<Item> = Vec::new();
    let mut capture_extras = false;

    for group in row.select(&selectors::OPTGROUP) {
        let label = group.value().attr(selectors::LABEL_ATTR).unwrap_or_default();
        if label == criteria.subcategory {
            collect_options(group, &mut items);
            capture_extras = true;
        } else if capture_extras {
            collect_options(group, &mut extras);
            break;
        }
    }

    debug!(
        "Parsed {} items for {} ({} extras excluded)",
        items.len(),
        criteria,
        extras.len()
    );

    items.retain(|item| !extras.contains(item));
    items
}

/// Finds the table row containing the category label.
///
/// The category is a bare text node inside a cell; the row is that cell's
/// parent, and it holds the `<select>` with the subcategory groups.
fn find_category_row<'a>(html: &'a Html, category: &str) -> Option<ElementRef<'a>> {
    let text_node = html
        .tree
        .nodes()
        .find(|node| matches!(node.value(), Node::Text(text) if &*text.text == category))?;

    let cell = text_node.parent().and_then(ElementRef::wrap)?;
    cell.parent().and_then(ElementRef::wrap)
}

/// Collects the enabled, well-formed options of a group.
fn collect_options(group: ElementRef, out: &mut Vec<Item>) {
    for option in group.select(&selectors::OPTION) {
        if option.value().attr(selectors::DISABLED_ATTR).is_some() {
            continue;
        }

        let text = option.text().collect::<String>();
        match NAME_PRICE_RE.captures(&text) {
            Some(caps) => out.push(Item::new(&caps[1], &caps[2])),
            None => trace!("Skipping option without name/price: {:?}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!("<html><body><form><table>{}</table></form></body></html>", body)
    }

    #[test]
    fn test_parse_basic_group() {
        let html = page(
            "<tr><td>SSD</td><td><select>\
             <optgroup label='M.2'>\
             <option>Kingston A400, $1050 480G</option>\
             <option>WD Blue, $1690 1TB</option>\
             </optgroup>\
             </select></td></tr>",
        );

        let items = parse(&html, &Criteria::new("SSD", "M.2"));
        assert_eq!(
            items,
            vec![Item::new("Kingston A400", "1050"), Item::new("WD Blue", "1690")]
        );
    }

    #[test]
    fn test_parse_skips_disabled_options() {
        let html = page(
            "<tr><td>SSD</td><td><select>\
             <optgroup label='M.2'>\
             <option>Kingston A400, $1050 480G</option>\
             <option disabled>WD Blue, $1690 1TB</option>\
             </optgroup>\
             </select></td></tr>",
        );

        let items = parse(&html, &Criteria::new("SSD", "M.2"));
        assert_eq!(items, vec![Item::new("Kingston A400", "1050")]);
    }

    #[test]
    fn test_parse_skips_malformed_options() {
        let html = page(
            "<tr><td>SSD</td><td><select>\
             <optgroup label='M.2'>\
             <option>請選擇</option>\
             <option>Kingston A400, $1050 480G</option>\
             <option>No price here</option>\
             </optgroup>\
             </select></td></tr>",
        );

        let items = parse(&html, &Criteria::new("SSD", "M.2"));
        assert_eq!(items, vec![Item::new("Kingston A400", "1050")]);
    }

    #[test]
    fn test_parse_excludes_following_group_extras() {
        let html = page(
            "<tr><td>SSD</td><td><select>\
             <optgroup label='M.2'>\
             <option>Kingston A400, $1050 480G</option>\
             <option>WD Blue, $1690 1TB</option>\
             </optgroup>\
             <optgroup label='Accessories'>\
             <option>WD Blue, $1690 1TB</option>\
             <option>Bracket, $90 2.5 inch</option>\
             </optgroup>\
             </select></td></tr>",
        );

        let items = parse(&html, &Criteria::new("SSD", "M.2"));
        assert_eq!(items, vec![Item::new("Kingston A400", "1050")]);
    }

    #[test]
    fn test_parse_extras_scenario_all_excluded() {
        // The only enabled matching item also appears in the next group,
        // so the result is empty.
        let html = page(
            "<tr><td>SSD</td><td><select>\
             <optgroup label='M.2'>\
             <option>Brand X, $1000 desc</option>\
             <option disabled>Brand Y, $999 desc</option>\
             </optgroup>\
             <optgroup label='Accessories'>\
             <option>Brand X, $1000 desc</option>\
             </optgroup>\
             </select></td></tr>",
        );

        let items = parse(&html, &Criteria::new("SSD", "M.2"));
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_only_next_group_counts_as_extras() {
        // A group two positions after the match is out of extras range.
        let html = page(
            "<tr><td>SSD</td><td><select>\
             <optgroup label='M.2'>\
             <option>Brand X, $1000 desc</option>\
             </optgroup>\
             <optgroup label='Accessories'>\
             <option>Bracket, $90 desc</option>\
             </optgroup>\
             <optgroup label='More'>\
             <option>Brand X, $1000 desc</option>\
             </optgroup>\
             </select></td></tr>",
        );

        let items = parse(&html, &Criteria::new("SSD", "M.2"));
        assert_eq!(items, vec![Item::new("Brand X", "1000")]);
    }

    #[test]
    fn test_parse_category_not_found() {
        let html = page(
            "<tr><td>SSD</td><td><select>\
             <optgroup label='M.2'><option>Brand X, $1000 desc</option></optgroup>\
             </select></td></tr>",
        );

        let items = parse(&html, &Criteria::new("HDD", "M.2"));
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_subcategory_not_found() {
        let html = page(
            "<tr><td>SSD</td><td><select>\
             <optgroup label='M.2'><option>Brand X, $1000 desc</option></optgroup>\
             </select></td></tr>",
        );

        let items = parse(&html, &Criteria::new("SSD", "SATA"));
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_category_match_is_exact() {
        let html = page(
            "<tr><td>SSD drives</td><td><select>\
             <optgroup label='M.2'><option>Brand X, $1000 desc</option></optgroup>\
             </select></td></tr>",
        );

        assert!(parse(&html, &Criteria::new("SSD", "M.2")).is_empty());
        assert_eq!(parse(&html, &Criteria::new("SSD drives", "M.2")).len(), 1);
    }

    #[test]
    fn test_parse_ignores_other_category_rows() {
        let html = page(
            "<tr><td>CPU</td><td><select>\
             <optgroup label='Intel'><option>i5-12400, $5400 6c</option></optgroup>\
             </select></td></tr>\
             <tr><td>SSD</td><td><select>\
             <optgroup label='Intel'><option>Optane, $3000 118G</option></optgroup>\
             </select></td></tr>",
        );

        let items = parse(&html, &Criteria::new("SSD", "Intel"));
        assert_eq!(items, vec![Item::new("Optane", "3000")]);
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse("", &Criteria::new("SSD", "M.2")).is_empty());
        assert!(parse("<html></html>", &Criteria::new("SSD", "M.2")).is_empty());
    }

    #[test]
    fn test_name_price_pattern() {
        let caps = NAME_PRICE_RE.captures("WD Blue SN580, $1690 1TB/讀4150M").unwrap();
        assert_eq!(&caps[1], "WD Blue SN580");
        assert_eq!(&caps[2], "1690");

        // Name may itself contain a comma; the match is greedy.
        let caps = NAME_PRICE_RE.captures("A, B, $100 x").unwrap();
        assert_eq!(&caps[1], "A, B");

        assert!(NAME_PRICE_RE.captures("no price").is_none());
        assert!(NAME_PRICE_RE.captures("name, $100").is_none()); // no trailing description
    }
}
