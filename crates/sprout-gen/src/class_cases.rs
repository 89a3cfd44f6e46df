//! Per-method cases for a class.
//!
//! Every method gets one case named `test_<class_snake>_<method>`; the body
//! shape depends on the method's role. Instances are built by calling the
//! class with synthesized constructor arguments.

use rand::Rng;
use sprout_core::{ClassDescriptor, FunctionDescriptor, SampleValue, TestCase, TestData};

use crate::assertions::RuntimeCheck;
use crate::builder::{
    TestCaseBuilder, ensure_unique_names, has_numeric_parameters, invocation, raises_block,
    uniform_data,
};

const ACCESSOR_PREFIXES: &[&str] = &["get_", "is_", "has_"];
const MUTATOR_PREFIXES: &[&str] = &[
    "set_", "add_", "remove_", "update_", "delete_", "append_", "insert_", "clear_", "pop_",
];

/// Role of a method, decided from its name and decorators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodRole {
    Constructor,
    Property,
    Static,
    ClassMethod,
    Accessor,
    Mutator,
    Plain,
}

impl MethodRole {
    #[must_use]
    pub fn of(method: &FunctionDescriptor) -> Self {
        let name = method.name.as_str();
        if name == "__init__" {
            Self::Constructor
        } else if method.is_property {
            Self::Property
        } else if method.is_static {
            Self::Static
        } else if method.is_class_method {
            Self::ClassMethod
        } else if ACCESSOR_PREFIXES.iter().any(|p| name.starts_with(p)) {
            Self::Accessor
        } else if MUTATOR_PREFIXES.iter().any(|p| name.starts_with(p)) {
            Self::Mutator
        } else {
            Self::Plain
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::Property => "property",
            Self::Static => "static method",
            Self::ClassMethod => "class method",
            Self::Accessor => "accessor",
            Self::Mutator => "mutator",
            Self::Plain => "method",
        }
    }
}

impl<R: Rng> TestCaseBuilder<R> {
    /// One case per method, plus a negative-input case for methods taking
    /// numeric-looking parameters.
    pub fn generate_class_test_cases(&mut self, class: &ClassDescriptor) -> Vec<TestCase> {
        let class_snake = snake_case(&class.name);
        let mut cases = Vec::new();

        for method in &class.methods {
            let role = MethodRole::of(method);
            let stem = format!("test_{class_snake}_{}", method.name.trim_matches('_'));
            let data = self.synthesizer.synthesize(method);
            let setup = self.instance_setup(class, role);

            cases.push(TestCase {
                test_name: stem.clone(),
                function_name: format!("{}.{}", class.name, method.name),
                body: role_body(class, method, role, &data, &setup),
                parameters: data,
                description: format!("Test {}.{} {}", class.name, method.name, role.label()),
                docstring: Some(method_docstring(class, method, role)),
                is_async: method.is_async,
            });

            if has_numeric_parameters(method) {
                let negative = uniform_data(method, &SampleValue::Int(-1));
                let expression = invocation(method, &callee(class, method, role), &negative);
                cases.push(TestCase {
                    test_name: format!("{stem}_negative_input"),
                    function_name: format!("{}.{}", class.name, method.name),
                    body: raises_block("ValueError", &setup, &expression),
                    parameters: negative,
                    description: "Test with negative input".to_string(),
                    docstring: Some("Test handling of negative input values.".to_string()),
                    is_async: method.is_async,
                });
            }
        }

        ensure_unique_names(&mut cases);
        tracing::debug!(class = %class.name, cases = cases.len(), "generated class test cases");
        cases
    }

    /// `instance = Class(...)` for roles that need a receiver.
    fn instance_setup(&mut self, class: &ClassDescriptor, role: MethodRole) -> Vec<String> {
        match role {
            MethodRole::Constructor | MethodRole::Static | MethodRole::ClassMethod => Vec::new(),
            _ => {
                let args = class
                    .constructor()
                    .map(|init| self.synthesizer.synthesize(init))
                    .unwrap_or_default();
                vec![format!(
                    "instance = {}({})",
                    class.name,
                    args.keyword_arguments()
                )]
            }
        }
    }
}

fn callee(class: &ClassDescriptor, method: &FunctionDescriptor, role: MethodRole) -> String {
    match role {
        MethodRole::Constructor => class.name.clone(),
        MethodRole::Static | MethodRole::ClassMethod => format!("{}.{}", class.name, method.name),
        _ => format!("instance.{}", method.name),
    }
}

fn role_body(
    class: &ClassDescriptor,
    method: &FunctionDescriptor,
    role: MethodRole,
    data: &TestData,
    setup: &[String],
) -> String {
    let mut lines = setup.to_vec();
    let returns = RuntimeCheck::for_annotation(method.return_type.as_deref(), Some(&class.name));

    match role {
        MethodRole::Constructor => {
            lines.push(format!("instance = {}({})", class.name, data.keyword_arguments()));
            lines.push(format!("assert isinstance(instance, {})", class.name));
        }
        MethodRole::Property => {
            lines.push(format!("value = instance.{}", method.name));
            lines.extend(returns.assertion("value"));
        }
        MethodRole::Mutator if matches!(returns, RuntimeCheck::IsNone | RuntimeCheck::Skip) => {
            lines.push(invocation(method, &callee(class, method, role), data));
            lines.push("assert instance is not None".to_string());
        }
        _ => {
            lines.push(format!(
                "result = {}",
                invocation(method, &callee(class, method, role), data)
            ));
            let check = match (&returns, role) {
                (RuntimeCheck::Skip, MethodRole::Accessor)
                    if method.name.starts_with("is_") || method.name.starts_with("has_") =>
                {
                    RuntimeCheck::Instance(vec!["bool".to_string()])
                }
                _ => returns,
            };
            lines.extend(check.assertion("result"));
        }
    }
    lines.join("\n")
}

fn method_docstring(class: &ClassDescriptor, method: &FunctionDescriptor, role: MethodRole) -> String {
    let mut doc = format!("Test the {} {}.{}.", role.label(), class.name, method.name);
    if let Some(original) = &method.docstring {
        doc.push_str("\n\nOriginal method: ");
        doc.push_str(original);
    }
    doc
}

/// `ShoppingCart` -> `shopping_cart`, `HTTPClient` -> `http_client`.
#[must_use]
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev != '_' && (prev.is_lowercase() || prev.is_ascii_digit() || next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sprout_core::ParameterDescriptor;

    use super::*;

    fn shopping_cart() -> ClassDescriptor {
        ClassDescriptor::new("ShoppingCart")
            .with_method(FunctionDescriptor::new("__init__").with_parameters(["self", "owner"]))
            .with_method(
                FunctionDescriptor::new("add_item")
                    .with_parameters(["self", "name", "price", "quantity"])
                    .with_return_type("None"),
            )
            .with_method(
                FunctionDescriptor::new("get_total")
                    .with_parameters(["self"])
                    .with_return_type("float"),
            )
    }

    #[rstest]
    #[case("ShoppingCart", "shopping_cart")]
    #[case("HTTPClient", "http_client")]
    #[case("Cart", "cart")]
    #[case("V2Parser", "v2_parser")]
    #[case("already_snake", "already_snake")]
    fn converts_to_snake_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(snake_case(input), expected);
    }

    #[test]
    fn every_method_gets_a_named_case() {
        let cases = TestCaseBuilder::with_seed(5).generate_class_test_cases(&shopping_cart());
        let names: Vec<_> = cases.iter().map(|c| c.test_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "test_shopping_cart_init",
                "test_shopping_cart_add_item",
                "test_shopping_cart_add_item_negative_input",
                "test_shopping_cart_get_total",
            ]
        );
    }

    #[test]
    fn constructor_case_builds_instance() {
        let cases = TestCaseBuilder::with_seed(5).generate_class_test_cases(&shopping_cart());
        assert_eq!(
            cases[0].body,
            "instance = ShoppingCart(owner='test_value')\nassert isinstance(instance, ShoppingCart)"
        );
        assert_eq!(cases[0].function_name, "ShoppingCart.__init__");
    }

    #[test]
    fn mutator_and_accessor_bodies() {
        let cases = TestCaseBuilder::with_seed(5).generate_class_test_cases(&shopping_cart());
        let add = &cases[1];
        let lines: Vec<_> = add.body.lines().collect();
        assert_eq!(lines[0], "instance = ShoppingCart(owner='test_value')");
        assert!(lines[1].starts_with("instance.add_item(name='test_value', price="));
        assert_eq!(lines[2], "assert instance is not None");
        assert!(!add.parameters.contains("self"));

        let negative = &cases[2];
        assert!(negative.body.ends_with(
            "with pytest.raises(ValueError):\n    instance.add_item(name=-1, price=-1, quantity=-1)"
        ));

        let total = &cases[3];
        assert!(total.body.ends_with("result = instance.get_total()\nassert isinstance(result, float)"));
    }

    #[test]
    fn decorated_roles() {
        let mut area = FunctionDescriptor::new("area").with_parameters(["self"]).with_return_type("float");
        area.is_property = true;
        let mut unit = FunctionDescriptor::new("unit").with_return_type("Self");
        unit.is_class_method = true;
        let mut check = FunctionDescriptor::new("is_valid").with_parameters(["self"]);
        check.is_method = true;

        let class = ClassDescriptor::new("Shape")
            .with_method(area)
            .with_method(unit)
            .with_method(check);
        let cases = TestCaseBuilder::with_seed(5).generate_class_test_cases(&class);

        assert_eq!(
            cases[0].body,
            "instance = Shape()\nvalue = instance.area\nassert isinstance(value, float)"
        );
        assert_eq!(cases[1].body, "result = Shape.unit()\nassert isinstance(result, Shape)");
        assert_eq!(
            cases[2].body,
            "instance = Shape()\nresult = instance.is_valid()\nassert isinstance(result, bool)"
        );
    }

    #[test]
    fn roles_follow_name_and_decorators() {
        let m = |name: &str| FunctionDescriptor::new(name).as_method();
        assert_eq!(MethodRole::of(&m("__init__")), MethodRole::Constructor);
        assert_eq!(MethodRole::of(&m("get_total")), MethodRole::Accessor);
        assert_eq!(MethodRole::of(&m("has_items")), MethodRole::Accessor);
        assert_eq!(MethodRole::of(&m("pop_last")), MethodRole::Mutator);
        assert_eq!(MethodRole::of(&m("checkout")), MethodRole::Plain);
        let mut s = m("helper");
        s.is_static = true;
        assert_eq!(MethodRole::of(&s), MethodRole::Static);
    }

    #[test]
    fn async_method_is_awaited() {
        let class = ClassDescriptor::new("Client").with_method(
            FunctionDescriptor::new("fetch")
                .with_parameter(ParameterDescriptor::new("self"))
                .with_parameter(ParameterDescriptor::new("order_id"))
                .asynchronous(),
        );
        let cases = TestCaseBuilder::with_seed(5).generate_class_test_cases(&class);
        assert!(cases[0].is_async);
        assert!(cases[0].body.contains("result = await instance.fetch(order_id="));
    }
}
