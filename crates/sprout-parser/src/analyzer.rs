//! Single-pass structural analysis over a [`SyntaxTree`].
//!
//! The walk threads a [`Scope`] down the recursion instead of keeping
//! "current class" / "current function" state on the analyzer, so one
//! [`StructuralAnalyzer`] can be shared across threads.
//!
//! A branch counts toward every function it sits in, so a nested helper's
//! branches also raise the complexity of the functions that contain it.
//! Generator status is scoped tighter: nested functions and classes start
//! their own scope, and a `yield` inside a nested helper marks only the
//! helper.

use std::collections::{BTreeSet, HashMap};

use sprout_core::{
    AnalysisRules, ClassDescriptor, CodeStructure, FunctionDescriptor, ImportDescriptor,
};

use crate::tree::{ClassNode, FunctionNode, NodeId, NodeKind, SyntaxTree};

/// Modules whose import marks a file as a test module.
const TEST_FRAMEWORK_MODULES: &[&str] = &["pytest", "unittest", "nose", "nose2"];

const TEST_CLASS_PREFIX: &str = "Test";
const TEST_BASE_CLASS: &str = "TestCase";
const TEST_FUNCTION_PREFIX: &str = "test_";

/// Builds a [`CodeStructure`] from a syntax tree.
#[derive(Debug, Clone, Default)]
pub struct StructuralAnalyzer {
    rules: AnalysisRules,
}

impl StructuralAnalyzer {
    #[must_use]
    pub const fn new(rules: AnalysisRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub const fn rules(&self) -> &AnalysisRules {
        &self.rules
    }

    /// Walk `tree` once and return its structural model.
    #[must_use]
    pub fn analyze(&self, tree: &SyntaxTree) -> CodeStructure {
        analyze_with(tree, &self.rules)
    }
}

/// Analyze `tree` under explicit rules.
#[must_use]
pub fn analyze_with(tree: &SyntaxTree, rules: &AnalysisRules) -> CodeStructure {
    let mut walk = Walk {
        tree,
        rules,
        functions: Vec::new(),
        classes: Vec::new(),
        class_slots: HashMap::new(),
        imports: Vec::new(),
        module_docstring: None,
    };
    if !tree.is_empty() {
        walk.visit(tree.root(), Scope::default());
    }
    let structure = walk.finish();

    tracing::debug!(
        functions = structure.functions.len(),
        classes = structure.classes.len(),
        imports = structure.imports.len(),
        is_test_file = structure.is_test_file,
        "analyzed module"
    );
    structure
}

/// Lexical context of the node being visited.
#[derive(Debug, Clone, Copy, Default)]
struct Scope {
    /// Draft index of the nearest enclosing function, reset by classes.
    function: Option<usize>,
    /// Draft index of the innermost function at any depth. Its
    /// `enclosing` links lead to every function containing this node.
    innermost: Option<usize>,
    /// Slot of the nearest enclosing class.
    class: Option<usize>,
    /// Some ancestor is a class body.
    inside_class: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    TopLevel,
    /// Defined directly in the body of the class in this slot.
    Method(usize),
    /// Nested somewhere below a class (e.g. a helper inside a method).
    /// Not reported, but still seen by test-file detection.
    ClassScoped,
}

struct FunctionDraft {
    descriptor: FunctionDescriptor,
    owner: Owner,
    enclosing: Option<usize>,
    qualified_name: String,
}

struct ClassDraft {
    descriptor: ClassDescriptor,
    qualified_name: String,
}

struct Walk<'t> {
    tree: &'t SyntaxTree,
    rules: &'t AnalysisRules,
    functions: Vec<FunctionDraft>,
    classes: Vec<ClassDraft>,
    class_slots: HashMap<NodeId, usize>,
    imports: Vec<ImportDescriptor>,
    module_docstring: Option<String>,
}

impl Walk<'_> {
    fn visit(&mut self, id: NodeId, scope: Scope) {
        let tree = self.tree;
        let node = tree.node(id);

        let inner = match &node.kind {
            NodeKind::Module { docstring } => {
                self.module_docstring.clone_from(docstring);
                scope
            }
            NodeKind::Function(function) => self.enter_function(id, function, scope),
            NodeKind::Class(class) => self.enter_class(id, class, scope),
            NodeKind::Import(imports) => {
                self.imports.extend(imports.iter().cloned());
                scope
            }
            NodeKind::If
            | NodeKind::Elif
            | NodeKind::For { .. }
            | NodeKind::While
            | NodeKind::ExceptHandler
            | NodeKind::With { .. }
            | NodeKind::BoolOp
            | NodeKind::Await => {
                self.bump_complexity(scope);
                scope
            }
            NodeKind::Yield => {
                if let Some(index) = scope.function {
                    self.functions[index].descriptor.is_generator = true;
                }
                scope
            }
            NodeKind::Decorated | NodeKind::Block | NodeKind::Other => scope,
        };

        for &child in &node.children {
            self.visit(child, inner);
        }
    }

    fn bump_complexity(&mut self, scope: Scope) {
        let mut current = scope.innermost;
        while let Some(index) = current {
            let draft = &mut self.functions[index];
            draft.descriptor.complexity += 1;
            current = draft.enclosing;
        }
    }

    fn enter_function(&mut self, id: NodeId, function: &FunctionNode, scope: Scope) -> Scope {
        let owner = match self
            .tree
            .enclosing_class_body(id)
            .and_then(|class| self.class_slots.get(&class).copied())
        {
            Some(slot) => Owner::Method(slot),
            None if scope.inside_class => Owner::ClassScoped,
            None => Owner::TopLevel,
        };

        let node = self.tree.node(id);
        let qualified_name = match owner {
            Owner::Method(slot) => format!("{}.{}", self.classes[slot].qualified_name, function.name),
            _ => function.name.clone(),
        };

        let descriptor = self.describe_function(function, node.start_line, node.end_line, owner);
        self.functions.push(FunctionDraft {
            descriptor,
            owner,
            enclosing: scope.innermost,
            qualified_name,
        });

        let index = self.functions.len() - 1;
        Scope {
            function: Some(index),
            innermost: Some(index),
            ..scope
        }
    }

    fn describe_function(
        &self,
        function: &FunctionNode,
        start_line: u32,
        end_line: u32,
        owner: Owner,
    ) -> FunctionDescriptor {
        let has_decorator = |name: &str| {
            function
                .decorators
                .iter()
                .any(|d| d.simple_name.as_deref() == Some(name))
        };
        let span = end_line.saturating_sub(start_line) as usize + 1;

        FunctionDescriptor {
            name: function.name.clone(),
            parameters: function.parameters.clone(),
            return_type: function.return_type.clone(),
            docstring: function.docstring.clone(),
            complexity: 1,
            is_async: function.is_async,
            is_generator: false,
            is_coroutine: function.is_async,
            is_property: has_decorator("property"),
            is_static: has_decorator("staticmethod"),
            is_class_method: has_decorator("classmethod"),
            exceeds_length_limit: span > self.rules.max_function_length,
            is_method: matches!(owner, Owner::Method(_)),
            decorators: function.decorators.iter().map(|d| d.text.clone()).collect(),
            body: function.source.clone(),
            start_line,
            end_line,
        }
    }

    fn enter_class(&mut self, id: NodeId, class: &ClassNode, scope: Scope) -> Scope {
        let node = self.tree.node(id);
        let qualified_name = match scope.class {
            Some(outer) => format!("{}.{}", self.classes[outer].qualified_name, class.name),
            None => class.name.clone(),
        };

        let descriptor = ClassDescriptor {
            name: class.name.clone(),
            methods: Vec::new(),
            base_classes: class.bases.clone(),
            docstring: class.docstring.clone(),
            is_test_class: is_test_class(&class.name, &class.bases),
            start_line: node.start_line,
            end_line: node.end_line,
        };

        let slot = self.classes.len();
        self.classes.push(ClassDraft {
            descriptor,
            qualified_name,
        });
        self.class_slots.insert(id, slot);

        Scope {
            function: None,
            innermost: scope.innermost,
            class: Some(slot),
            inside_class: true,
        }
    }

    fn finish(self) -> CodeStructure {
        let is_test_file = self.is_test_file();
        let missing_docstrings = if self.rules.check_docstrings {
            self.missing_docstrings()
        } else {
            Vec::new()
        };

        let mut classes: Vec<ClassDescriptor> =
            self.classes.into_iter().map(|c| c.descriptor).collect();
        let mut functions = Vec::new();
        for draft in self.functions {
            match draft.owner {
                Owner::TopLevel => functions.push(draft.descriptor),
                Owner::Method(slot) => classes[slot].methods.push(draft.descriptor),
                Owner::ClassScoped => {}
            }
        }

        let dependencies: BTreeSet<String> = self
            .imports
            .iter()
            .filter_map(ImportDescriptor::root_module)
            .map(str::to_string)
            .collect();

        CodeStructure {
            language: self.tree.language(),
            functions,
            classes,
            imports: self.imports,
            dependencies,
            is_test_file,
            module_docstring: self.module_docstring,
            missing_docstrings,
        }
    }

    fn is_test_file(&self) -> bool {
        let imports_framework = self.imports.iter().any(|import| {
            import
                .root_module()
                .is_some_and(|root| TEST_FRAMEWORK_MODULES.contains(&root))
        });
        imports_framework
            || self.classes.iter().any(|c| c.descriptor.is_test_class)
            || self
                .functions
                .iter()
                .any(|f| f.descriptor.name.starts_with(TEST_FUNCTION_PREFIX))
    }

    /// Reported classes and functions without a docstring, by start line.
    fn missing_docstrings(&self) -> Vec<String> {
        let classes = self
            .classes
            .iter()
            .filter(|c| c.descriptor.docstring.is_none())
            .map(|c| (c.descriptor.start_line, &c.qualified_name));
        let functions = self
            .functions
            .iter()
            .filter(|f| f.owner != Owner::ClassScoped && f.descriptor.docstring.is_none())
            .map(|f| (f.descriptor.start_line, &f.qualified_name));

        let mut missing: Vec<(u32, &String)> = classes.chain(functions).collect();
        missing.sort_by_key(|(line, _)| *line);
        missing.into_iter().map(|(_, name)| name.clone()).collect()
    }
}

fn is_test_class(name: &str, bases: &[String]) -> bool {
    name.starts_with(TEST_CLASS_PREFIX)
        || bases.iter().any(|base| {
            base == TEST_BASE_CLASS
                || base
                    .rsplit_once('.')
                    .is_some_and(|(_, last)| last == TEST_BASE_CLASS)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceParser;

    fn analyze_source(source: &str) -> CodeStructure {
        let tree = SourceParser::python().parse(source).unwrap();
        StructuralAnalyzer::default().analyze(&tree)
    }

    fn complexity_of(source: &str, name: &str) -> u32 {
        analyze_source(source)
            .all_functions()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("no function {name}"))
            .complexity
    }

    #[test]
    fn straight_line_function_has_complexity_one() {
        assert_eq!(complexity_of("def f(x):\n    return x\n", "f"), 1);
    }

    #[test]
    fn branches_and_loops_each_add_one() {
        let source = r"
def f(xs):
    for x in xs:
        if x > 1:
            pass
        elif x < 0:
            pass
        else:
            pass
    while xs:
        xs.pop()
    try:
        pass
    except KeyError:
        pass
    except ValueError:
        pass
    with open('f') as fh:
        pass
";
        // 1 + for + if + elif + while + 2 handlers + with
        assert_eq!(complexity_of(source, "f"), 8);
    }

    #[test]
    fn boolean_chain_adds_operands_minus_one() {
        let source = "def f(a, b, c, d):\n    return a and b or c and d\n";
        assert_eq!(complexity_of(source, "f"), 4);
    }

    #[test]
    fn async_constructs_count_once_and_awaits_add_one() {
        let source = r"
async def f(stream, lock):
    async for chunk in stream:
        await chunk.save()
    async with lock:
        await lock.release()
";
        // 1 + async for + async with + 2 awaits
        assert_eq!(complexity_of(source, "f"), 5);
    }

    #[test]
    fn nested_function_branches_count_toward_outer() {
        let source = r"
def outer(x):
    def inner(y):
        if y:
            return 1
        return 0
    return inner(x)
";
        assert_eq!(complexity_of(source, "outer"), 2);
        assert_eq!(complexity_of(source, "inner"), 2);
    }

    #[test]
    fn branches_credit_every_enclosing_function() {
        let source = r"
def outer(xs):
    for x in xs:
        pass
    def middle():
        class Local:
            def method(self, y):
                if y:
                    return y
        while xs:
            xs.pop()
    return middle
";
        // outer: 1 + for + while + if; middle: 1 + while + if
        assert_eq!(complexity_of(source, "outer"), 4);
        assert_eq!(complexity_of(source, "middle"), 3);
        assert_eq!(complexity_of(source, "method"), 2);
    }

    #[test]
    fn nested_functions_outside_classes_are_top_level() {
        let structure = analyze_source(
            "def outer():\n    def inner():\n        pass\n    return inner\n",
        );
        let names: Vec<_> = structure.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["outer", "inner"]);
    }

    #[test]
    fn methods_are_direct_body_functions_only() {
        let source = r"
class Outer:
    def method(self):
        def helper():
            pass
        return helper

    class Inner:
        def inner_method(self):
            pass
";
        let structure = analyze_source(source);
        assert!(structure.functions.is_empty());
        let outer = structure.class("Outer").unwrap();
        let names: Vec<_> = outer.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["method"]);
        assert!(outer.methods[0].is_method);
        let inner = structure.class("Inner").unwrap();
        assert_eq!(inner.methods.len(), 1);
        assert_eq!(inner.methods[0].name, "inner_method");
    }

    #[test]
    fn yield_in_nested_helper_does_not_mark_outer() {
        let source = r"
def outer():
    def gen():
        yield 1
    return list(gen())
";
        let structure = analyze_source(source);
        assert!(!structure.function("outer").unwrap().is_generator);
        assert!(structure.function("gen").unwrap().is_generator);
    }

    #[test]
    fn decorator_flags_use_simple_names() {
        let source = r"
class Shape:
    @property
    def area(self):
        return 0

    @staticmethod
    def unit():
        return 1

    @classmethod
    def build(cls):
        return cls()

    @functools.cached_property
    def perimeter(self):
        return 0
";
        let structure = analyze_source(source);
        let shape = structure.class("Shape").unwrap();
        assert!(shape.method("area").unwrap().is_property);
        assert!(shape.method("unit").unwrap().is_static);
        assert!(shape.method("build").unwrap().is_class_method);
        let perimeter = shape.method("perimeter").unwrap();
        assert!(!perimeter.is_property);
        assert_eq!(perimeter.decorators, vec!["functools.cached_property"]);
    }

    #[test]
    fn length_limit_respects_rules() {
        let body: String = (0..5).map(|i| format!("    x{i} = {i}\n")).collect();
        let source = format!("def long():\n{body}");
        let tree = SourceParser::python().parse(&source).unwrap();

        let strict = AnalysisRules {
            max_function_length: 3,
            ..AnalysisRules::default()
        };
        assert!(analyze_with(&tree, &strict).functions[0].exceeds_length_limit);
        assert!(!analyze_with(&tree, &AnalysisRules::default()).functions[0].exceeds_length_limit);
    }

    #[test]
    fn missing_docstrings_are_qualified_and_optional() {
        let source = r#"
class Cart:
    """A cart."""

    def total(self):
        return 0


def helper():
    pass
"#;
        let tree = SourceParser::python().parse(source).unwrap();
        let structure = analyze_with(&tree, &AnalysisRules::default());
        assert_eq!(structure.missing_docstrings, vec!["Cart.total", "helper"]);

        let quiet = AnalysisRules {
            check_docstrings: false,
            ..AnalysisRules::default()
        };
        assert!(analyze_with(&tree, &quiet).missing_docstrings.is_empty());
    }

    #[test]
    fn test_class_heuristics() {
        assert!(is_test_class("TestCart", &[]));
        assert!(is_test_class("CartSuite", &["TestCase".to_string()]));
        assert!(is_test_class("CartSuite", &["unittest.TestCase".to_string()]));
        assert!(!is_test_class("Cart", &["MyTestCaseBase".to_string()]));
    }

    #[test]
    fn helper_named_test_inside_method_marks_test_file() {
        let source = r"
class Runner:
    def run(self):
        def test_inner():
            pass
        return test_inner
";
        assert!(analyze_source(source).is_test_file);
    }
}
