//! Substitution API Demonstration
//!
//! Shows the load → preview → apply flow against a scratch document:
//! 1. Preview a literal substitution (dry run, per-change records)
//! 2. Apply it for real (file rewritten in place)
//! 3. Regex mode with a backreference template
//! 4. Introspection helpers used to populate selection widgets

use xmlmod_core::{
    substitute_file, unique_tags, unique_values, Substitution,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("catalog.xml");
    std::fs::write(
        &path,
        "<catalog>\n  <item code=\"A1\"><price>10</price></item>\n  <item code=\"B2\"><price>10</price></item>\n</catalog>\n",
    )?;

    println!("=== xmlmod Substitution Demo ===\n");

    // ===== Part 1: Preview =====
    println!("## Part 1: Preview\n");
    let substitution = Substitution::literal("price", "10", "20");
    let previewed = substitute_file(&path, &substitution, true)?;
    println!("{} change(s) would be made:", previewed.count());
    for change in &previewed.changes {
        println!("  '{}' -> '{}'", change.previous, change.new);
    }

    // ===== Part 2: Apply =====
    println!("\n## Part 2: Apply\n");
    let applied = substitute_file(&path, &substitution, false)?;
    println!("{} change(s) applied", applied.count());
    println!("file now contains:\n{}", std::fs::read_to_string(&path)?);

    // ===== Part 3: Regex with backreference =====
    println!("## Part 3: Regex attribute rewrite\n");
    let recode = Substitution::pattern("item", r"([A-Z])(\d)", r"\2\1").on_attribute("code");
    let recoded = substitute_file(&path, &recode, false)?;
    for change in &recoded.changes {
        println!("  code '{}' -> '{}'", change.previous, change.new);
    }

    // ===== Part 4: Introspection =====
    println!("\n## Part 4: Introspection\n");
    println!("tags: {:?}", unique_tags(&path)?);
    println!("price values: {:?}", unique_values(&path, "price")?);

    Ok(())
}
