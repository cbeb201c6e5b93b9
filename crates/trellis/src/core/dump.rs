use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{NodeId, Tree, error::Result};

/// Render the subtree at `root` as indented text with node names, bounds and
/// flags. This is a debug function.
pub fn dump(tree: &Tree, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, tree, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Render without colour codes.
pub fn dump_plain(tree: &Tree, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, tree, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Write an indented, coloured label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Write a yellow flag marker.
fn write_flag(buffer: &mut Buffer, flag: &str) -> Result<()> {
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    write!(buffer, " ({flag})")?;
    buffer.reset()?;
    Ok(())
}

/// Write one node and recurse into its children.
fn dump_node(buffer: &mut Buffer, tree: &Tree, id: NodeId, level: usize) -> Result<()> {
    let Some(node) = tree.node(id) else {
        return Ok(());
    };
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.name())?;
    buffer.reset()?;
    if !node.is_visible() {
        write_flag(buffer, "hidden")?;
    }
    if !node.is_enabled() {
        write_flag(buffer, "disabled")?;
    }
    if node.ignores_layout() {
        write_flag(buffer, "ignore layout")?;
    }
    if tree.focus == Some(id) {
        write_flag(buffer, "focused")?;
    }
    writeln!(buffer)?;

    let b = node.bounds();
    write_field(
        buffer,
        &indent,
        "bounds:",
        &format!("x: {}, y: {}, w: {}, h: {}", b.x, b.y, b.width, b.height),
    )?;
    write_field(
        buffer,
        &indent,
        "style:",
        &format!("{:?}", node.layout().style),
    )?;

    for child in node.children() {
        dump_node(buffer, tree, *child, level + 1)?;
    }
    Ok(())
}
