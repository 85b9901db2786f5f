use super::*;

fn complexities(src: &str) -> Vec<(String, usize)> {
    analyze_source(src)
        .unwrap()
        .into_iter()
        .map(|f| (f.name, f.complexity))
        .collect()
}

#[test]
fn empty_function_is_one() {
    let src = "package main\n\nfunc main() {}\n";
    assert_eq!(complexities(src), vec![("main".to_string(), 1)]);
}

#[test]
fn two_ifs_and_one_and() {
    let src = "\
package check

func Check(x, y int) int {
	if x > 0 && y > 0 {
		return 1
	}
	if x < 0 {
		return -1
	}
	return 0
}
";
    assert_eq!(complexities(src), vec![("Check".to_string(), 4)]);
}

#[test]
fn else_if_counts_each_if() {
    let src = "\
package p

func Sign(x int) int {
	if x > 0 {
		return 1
	} else if x < 0 {
		return -1
	}
	return 0
}
";
    assert_eq!(complexities(src)[0].1, 3);
}

#[test]
fn for_and_range_loops() {
    let src = "\
package p

func Sum(v []int) int {
	t := 0
	for _, x := range v {
		t += x
	}
	for i := 0; i < 3; i++ {
		t++
	}
	for {
		break
	}
	return t
}
";
    assert_eq!(complexities(src)[0].1, 4);
}

#[test]
fn switch_counts_every_clause_including_default() {
    let src = "\
package p

func Name(n int) string {
	switch n {
	case 0:
		return \"zero\"
	case 1, 2:
		return \"few\"
	default:
		return \"many\"
	}
}
";
    assert_eq!(complexities(src)[0].1, 4);
}

#[test]
fn type_switch_clauses_count() {
    let src = "\
package p

func Kind(v interface{}) string {
	switch v.(type) {
	case int:
		return \"int\"
	case string:
		return \"string\"
	}
	return \"other\"
}
";
    assert_eq!(complexities(src)[0].1, 3);
}

#[test]
fn select_statement_and_clauses_count() {
    let src = "\
package p

func Recv(a, b chan int) int {
	select {
	case x := <-a:
		return x
	case y := <-b:
		return y
	default:
		return 0
	}
}
";
    // select + three clauses
    assert_eq!(complexities(src)[0].1, 5);
}

#[test]
fn or_operators_count() {
    let src = "package p\n\nfunc F(a, b, c bool) bool { return a || b || c }\n";
    assert_eq!(complexities(src)[0].1, 3);
}

#[test]
fn function_literals_belong_to_enclosing_function() {
    let src = "\
package p

func Outer(v []int) func() bool {
	return func() bool {
		if len(v) > 0 {
			return true
		}
		return false
	}
}
";
    assert_eq!(complexities(src), vec![("Outer".to_string(), 2)]);
}

#[test]
fn methods_are_receiver_qualified() {
    let src = "\
package p

type Stack struct{ items []int }

func (s *Stack) Push(x int) {
	if x > 0 {
		s.items = append(s.items, x)
	}
}

func (s Stack) Len() int { return len(s.items) }
";
    assert_eq!(
        complexities(src),
        vec![("Stack.Push".to_string(), 2), ("Stack.Len".to_string(), 1)]
    );
}

#[test]
fn generic_receiver_keeps_bare_name() {
    let src = "\
package p

type Box[T any] struct{ v T }

func (b *Box[T]) Get() T { return b.v }
";
    assert_eq!(complexities(src), vec![("Get".to_string(), 1)]);
}

#[test]
fn line_numbers_point_at_func_keyword() {
    let src = "package p\n\n// Later does nothing.\nfunc Later() {}\n";
    let funcs = analyze_source(src).unwrap();
    assert_eq!(funcs[0].line, 4);
}

#[test]
fn no_functions() {
    let src = "package p\n\nconst N = 3\n\ntype T struct{}\n";
    assert!(analyze_source(src).unwrap().is_empty());
}

#[test]
fn syntax_errors_are_rejected() {
    assert!(analyze_source("package p\n\nfunc broken( {\n").is_err());
}
