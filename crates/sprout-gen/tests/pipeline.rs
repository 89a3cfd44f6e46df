//! Source text through analysis, generation, and rendering.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use sprout_gen::{DEFAULT_CASE_COUNT, TemplateRenderer, TestCaseBuilder};

const PRICING: &str = r#"
def calculate_price(base_price: float, tax_rate: float = 0.1, discount: float = 0.0) -> float:
    """Calculate the final price.

    Applies the tax rate, then subtracts the discount.
    """
    return max(base_price * (1 + tax_rate) - discount, 0.0)
"#;

const CART: &str = r#"
class ShoppingCart:
    def __init__(self, owner: str):
        self.owner = owner
        self.items = []

    def add_item(self, name: str, price: float) -> None:
        self.items.append((name, price))

    def get_total(self) -> float:
        return sum(price for _, price in self.items)
"#;

#[test]
fn calculate_price_happy_path_and_docstring() {
    let structure = sprout_parser::analyze(PRICING).unwrap();
    let f = structure.function("calculate_price").unwrap();
    let cases = TestCaseBuilder::with_seed(11)
        .generate_test_cases(Some(f), DEFAULT_CASE_COUNT)
        .unwrap();

    let happy = &cases[0];
    assert!(happy.body.contains("assert isinstance(result, float)"));
    assert!(happy.body.contains("assert result >= 0"));
    assert!(
        cases
            .iter()
            .filter_map(|c| c.docstring.as_deref())
            .any(|d| d.contains("tax rate") && d.contains("discount"))
    );

    let names: Vec<_> = cases.iter().map(|c| c.test_name.as_str()).collect();
    assert!(names.contains(&"test_calculate_price_negative_input"));
    assert!(names.contains(&"test_calculate_price_zero_input"));
}

#[test]
fn padded_batches_have_unique_names() {
    let structure = sprout_parser::analyze(PRICING).unwrap();
    let f = structure.function("calculate_price").unwrap();
    let cases = TestCaseBuilder::with_seed(11)
        .generate_test_cases(Some(f), 9)
        .unwrap();
    assert!(cases.len() >= 9);
    let unique: HashSet<_> = cases.iter().map(|c| &c.test_name).collect();
    assert_eq!(unique.len(), cases.len());
}

#[test]
fn rendered_module_has_one_definition_per_case() {
    let structure = sprout_parser::analyze(PRICING).unwrap();
    let f = structure.function("calculate_price").unwrap();
    let cases = TestCaseBuilder::with_seed(3)
        .generate_test_cases(Some(f), 6)
        .unwrap();
    let module = TemplateRenderer::new().render_module(&cases);

    assert!(module.starts_with("import pytest\n"));
    let definitions = module.lines().filter(|l| l.starts_with("def test_")).count();
    assert_eq!(definitions, cases.len());
    for case in &cases {
        assert!(module.contains(&case.test_name));
    }
}

#[test]
fn shopping_cart_class_cases_reference_each_method() {
    let structure = sprout_parser::analyze(CART).unwrap();
    let cart = structure.class("ShoppingCart").unwrap();
    let cases = TestCaseBuilder::with_seed(2).generate_class_test_cases(cart);

    for method in ["init", "add_item", "get_total"] {
        assert!(
            cases.iter().any(|c| c.test_name.contains(method)),
            "no case for {method}: {cases:#?}"
        );
    }
}

#[test]
fn seeded_builders_are_reproducible() {
    let structure = sprout_parser::analyze(PRICING).unwrap();
    let f = structure.function("calculate_price").unwrap();
    let a = TestCaseBuilder::with_seed(99).generate_test_cases(Some(f), 5).unwrap();
    let b = TestCaseBuilder::with_seed(99).generate_test_cases(Some(f), 5).unwrap();
    assert_eq!(a, b);
}
