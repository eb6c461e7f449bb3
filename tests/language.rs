use std::{error::Error, fs};

use snakelet::run_program;
use walkdir::WalkDir;

fn run(source: &str) -> Result<String, Box<dyn Error>> {
    let mut output = Vec::new();
    run_program(source, &mut output)?;
    Ok(String::from_utf8(output)?)
}

fn assert_output(source: &str, expected: &str) {
    match run(source) {
        Ok(output) => assert_eq!(output, expected, "program:\n{source}"),
        Err(e) => panic!("Script failed: {e}\nprogram:\n{source}"),
    }
}

fn assert_failure(source: &str) {
    if run(source).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{source}");
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_output("print 1 + 2 * 3\n", "7\n");
    assert_output("print (1 + 2) * 3\n", "9\n");
    assert_output("print 10 - 2 - 3\n", "5\n");
    assert_output("print 7 / 2\n", "3\n");
    assert_output("print 2 + 10 / 5 * 3\n", "8\n");
}

#[test]
fn print_forms() {
    assert_output("print\n", "\n");
    assert_output("print 1, 2, 'three'\n", "1 2 three\n");
    assert_output("print True, False\n", "True False\n");
    assert_output("print None\n", "None\n");
    assert_output("x = 4\ny = x + 1\nprint x, y\n", "4 5\n");
}

#[test]
fn string_literals_and_concatenation() {
    assert_output("print 'ab' + 'cd'\n", "abcd\n");
    assert_output("print \"double\" + '-' + 'single'\n", "double-single\n");
    assert_output("print '\\n'\n", "\n\n");
    assert_output("print 'tab\\tend'\n", "tab\tend\n");
}

#[test]
fn stringify_builds_printed_forms() {
    assert_output("print str(12) + str(34)\n", "1234\n");
    assert_output("print str(None)\n", "None\n");
    assert_output("print str(True) + '!'\n", "True!\n");
}

#[test]
fn comparisons() {
    assert_output("print 1 < 2, 2 < 1, 2 == 2, 2 != 2\n", "True False True False\n");
    assert_output("print 3 >= 3, 3 > 3, 3 <= 2\n", "True False False\n");
    assert_output("print 'abc' < 'abd', 'b' < 'ab'\n", "True False\n");
    assert_output("print 'x' == 'x', 'x' != 'y'\n", "True True\n");
    assert_output("print False < True\n", "True\n");
    assert_output("print None == None, None != None\n", "True False\n");
}

#[test]
fn truthiness_and_logic() {
    assert_output("print not 0, not 1, not '', not 'x', not None\n", "True False True False True\n");
    assert_output("print 1 and 2, 0 and 1, 1 or 0, 0 or 0\n", "True False True False\n");
    assert_output("if 5:\n  print 'yes'\n", "yes\n");
    assert_output("if '':\n  print 'yes'\nelse:\n  print 'no'\n", "no\n");
}

#[test]
fn logic_short_circuits() {
    assert_output("print False and 1 / 0 == 0\n", "False\n");
    assert_output("print True or 1 / 0 == 0\n", "True\n");
    assert_failure("print True and 1 / 0 == 0\n");
}

#[test]
fn if_else_branches() {
    let source = "\
x = 10
if x > 5:
  print 'big'
else:
  print 'small'
if x < 5:
  print 'unreachable'
";
    assert_output(source, "big\n");
}

#[test]
fn class_with_str_method() {
    let source = "\
class A:
  def __str__(self):
    return 'a'
print A()
";
    assert_output(source, "a\n");
}

#[test]
fn instance_without_str_uses_fallback() {
    let source = "\
class Widget:
  def touch(self):
    return None
w = Widget()
print w
";
    assert_output(source, "Widget instance\n");
}

#[test]
fn class_objects_print_their_name() {
    let source = "\
class Widget:
  def touch(self):
    return None
print Widget
";
    assert_output(source, "Class Widget\n");
}

#[test]
fn init_sets_fields() {
    let source = "\
class Point:
  def __init__(self, x, y):
    self.x = x
    self.y = y
p = Point(3, 4)
print p.x, p.y
";
    assert_output(source, "3 4\n");
}

#[test]
fn assignment_shares_instances() {
    let source = "\
class Box:
  def __init__(self):
    self.value = 0
x = Box()
y = x
y.value = 42
print x.value
";
    assert_output(source, "42\n");
}

#[test]
fn method_overriding_shadows_parent() {
    let source = "\
class A:
  def f(self):
    return 1
class B(A):
  def f(self):
    return 2
x = B()
print x.f()
";
    assert_output(source, "2\n");
}

#[test]
fn method_lookup_walks_to_parent() {
    let source = "\
class A:
  def f(self):
    return 1
class B(A):
  def g(self):
    return 2
x = B()
print x.f(), x.g()
";
    assert_output(source, "1 2\n");
}

#[test]
fn inherited_method_sees_overridden_sibling() {
    let source = "\
class A:
  def describe(self):
    return 'value=' + str(self.value())
  def value(self):
    return 1
class B(A):
  def value(self):
    return 2
print B().describe()
";
    assert_output(source, "value=2\n");
}

#[test]
fn add_dunder_dispatches() {
    let source = "\
class Vec:
  def __init__(self, x):
    self.x = x
  def __add__(self, other):
    return self.x + other.x
print Vec(2) + Vec(3)
";
    assert_output(source, "5\n");
}

#[test]
fn comparison_dunders_drive_all_operators() {
    let source = "\
class Num:
  def __init__(self, n):
    self.n = n
  def __eq__(self, other):
    return self.n == other.n
  def __lt__(self, other):
    return self.n < other.n
a = Num(1)
b = Num(2)
print a < b, a > b, a == b, a != b, a <= b, a >= b
";
    assert_output(source, "True False False True True False\n");
}

#[test]
fn return_unwinds_nested_blocks() {
    let source = "\
class Finder:
  def sign(self, n):
    if n < 0:
      return 0 - 1
    if n == 0:
      return 0
    return 1
f = Finder()
print f.sign(0 - 5), f.sign(0), f.sign(9)
";
    assert_output(source, "-1 0 1\n");
}

#[test]
fn method_without_return_yields_none() {
    let source = "\
class Quiet:
  def nothing(self):
    x = 1
q = Quiet()
print q.nothing()
";
    assert_output(source, "None\n");
}

#[test]
fn bare_return_yields_none() {
    let source = "\
class Quiet:
  def nothing(self):
    return
q = Quiet()
print q.nothing()
";
    assert_output(source, "None\n");
}

#[test]
fn recursive_method_calls() {
    let source = "\
class Math:
  def fact(self, n):
    if n < 2:
      return 1
    return n * self.fact(n - 1)
m = Math()
print m.fact(10)
";
    assert_output(source, "3628800\n");
}

#[test]
fn chained_method_calls() {
    let source = "\
class Counter:
  def __init__(self):
    self.count = 0
  def tick(self):
    self.count = self.count + 1
    return self
c = Counter()
c.tick().tick().tick()
print c.count
";
    assert_output(source, "3\n");
}

#[test]
fn instances_are_falsy() {
    let source = "\
class Empty:
  def __init__(self):
    self.dummy = 0
if Empty():
  print 'truthy'
else:
  print 'falsy'
";
    assert_output(source, "falsy\n");
}

#[test]
fn extra_arguments_without_matching_init_are_ignored() {
    let source = "\
class Plain:
  def ping(self):
    return 'pong'
p = Plain(1, 2, 3)
print p.ping()
";
    assert_output(source, "pong\n");
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("print 1 / 0\n");
}

#[test]
fn overflow_is_error() {
    assert_failure("print 2147483647 + 1\n");
}

#[test]
fn unknown_variable_is_error() {
    assert_failure("print foo\n");
}

#[test]
fn mixed_operand_types_are_errors() {
    assert_failure("print 1 + 'a'\n");
    assert_failure("print 'a' - 'b'\n");
    assert_failure("print 1 < 'a'\n");
    assert_failure("print None < None\n");
}

#[test]
fn missing_method_is_error() {
    assert_failure("class A:\n  def f(self):\n    return 1\nx = A()\nprint x.g()\n");
}

#[test]
fn wrong_method_arity_is_error() {
    assert_failure("class A:\n  def f(self, n):\n    return n\nx = A()\nprint x.f()\n");
}

#[test]
fn field_access_on_non_instance_is_error() {
    assert_failure("x = 1\nprint x.y\n");
    assert_failure("x = 1\nprint x.f()\n");
}

#[test]
fn return_at_top_level_is_error() {
    assert_failure("return 1\n");
}

#[test]
fn unknown_callable_is_parse_error() {
    assert_failure("x = frobnicate(1)\n");
}

#[test]
fn undeclared_parent_is_parse_error() {
    assert_failure("class B(A):\n  def f(self):\n    return 1\n");
}

#[test]
fn method_without_self_is_parse_error() {
    assert_failure("class A:\n  def f():\n    return 1\n");
}

#[test]
fn sample_programs_match_expected_output() {
    let mut count = 0;

    for entry in WalkDir::new("tests/programs")
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "snk"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read {expected_path:?}: {e}"));

        count += 1;
        match run(&source) {
            Ok(output) => assert_eq!(output, expected, "program {path:?}"),
            Err(e) => panic!("Sample program {path:?} failed: {e}"),
        }
    }

    assert!(count > 0, "No sample programs found in tests/programs");
}
