//! `registry-idgen show` command.

use std::path::Path;

use crate::adapters::live::FileRepository;
use crate::model::ManagedObject;
use crate::ports::RepositoryClient;

/// Render an object for display.
#[must_use]
pub fn render(object: &ManagedObject) -> String {
    let mut out = format!("uri: {}\n", object.uri);
    if let Some(name) = &object.name {
        out.push_str(&format!("name: {name}\n"));
    }
    out.push_str(&format!(
        "primary type: {}\n",
        object.primary_type.as_deref().unwrap_or("<none>")
    ));
    out.push_str(&format!("version: {}\n", object.version));
    if object.properties.is_empty() {
        out.push_str("properties: <none>\n");
    } else {
        out.push_str("properties:\n");
        for (name, value) in &object.properties {
            out.push_str(&format!("  {name}: {value}\n"));
        }
    }
    out
}

/// Execute the `show` command.
///
/// # Errors
///
/// Returns an error string if the object cannot be retrieved.
pub fn run(store: &Path, uri: &str) -> Result<(), String> {
    let object = FileRepository::new(store).retrieve(uri, 1).map_err(|e| e.to_string())?;
    print!("{}", render(&object));
    Ok(())
}
