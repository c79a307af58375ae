use super::{BinaryOperator, Node};

/// Shortest text that parses back to the same value
pub fn format_scalar(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{}", value)
    }
}

pub(super) fn infix(node: &Node) -> String {
    let mut out = String::new();
    write_infix(node, &mut out);
    out
}

fn write_infix(node: &Node, out: &mut String) {
    match node {
        Node::Constant { value } => {
            if value.is_sign_negative() && !value.is_nan() {
                out.push('(');
                out.push_str(&format_scalar(*value));
                out.push(')');
            } else {
                out.push_str(&format_scalar(*value));
            }
        }
        Node::Variable { name } => out.push_str(name),
        Node::Unary { op, operand } => {
            out.push_str(op.infix_symbol());
            write_grouped(operand, matches!(**operand, Node::Binary { .. }), out);
        }
        Node::Binary { op, left, right } => {
            write_grouped(left, needs_group(*op, left, Side::Left), out);
            out.push(' ');
            out.push_str(op.symbol());
            out.push(' ');
            write_grouped(right, needs_group(*op, right, Side::Right), out);
        }
        Node::Call { function, args } => {
            out.push_str(function.name());
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_infix(arg, out);
            }
            out.push(')');
        }
    }
}

enum Side {
    Left,
    Right,
}

// Operands of equal precedence on the right are always grouped, which
// spells out right-associative chains such as `a ^ (b ^ c)`.
fn needs_group(parent: BinaryOperator, child: &Node, side: Side) -> bool {
    let Node::Binary { op, .. } = child else {
        return false;
    };
    match side {
        Side::Left => {
            op.precedence() < parent.precedence()
                || (op.precedence() == parent.precedence() && parent.is_right_associative())
        }
        Side::Right => op.precedence() <= parent.precedence(),
    }
}

fn write_grouped(node: &Node, grouped: bool, out: &mut String) {
    if grouped {
        out.push('(');
        write_infix(node, out);
        out.push(')');
    } else {
        write_infix(node, out);
    }
}

pub(super) fn prefix(node: &Node) -> String {
    let mut parts = Vec::new();
    walk(node, Order::Prefix, &mut parts);
    parts.join(" ")
}

pub(super) fn postfix(node: &Node) -> String {
    let mut parts = Vec::new();
    walk(node, Order::Postfix, &mut parts);
    parts.join(" ")
}

#[derive(Clone, Copy, PartialEq)]
enum Order {
    Prefix,
    Postfix,
}

fn walk(node: &Node, order: Order, parts: &mut Vec<String>) {
    let (label, children): (String, Vec<&Node>) = match node {
        Node::Constant { value } => (format_scalar(*value), Vec::new()),
        Node::Variable { name } => (name.clone(), Vec::new()),
        Node::Unary { op, operand } => (op.symbol().to_string(), vec![operand.as_ref()]),
        Node::Binary { op, left, right } => (
            op.symbol().to_string(),
            vec![left.as_ref(), right.as_ref()],
        ),
        Node::Call { function, args } => (function.name().to_string(), args.iter().collect()),
    };

    if order == Order::Prefix {
        parts.push(label.clone());
    }
    for child in children {
        walk(child, order, parts);
    }
    if order == Order::Postfix {
        parts.push(label);
    }
}
