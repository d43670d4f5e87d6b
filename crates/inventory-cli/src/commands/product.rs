//! Product command handlers

use anyhow::{anyhow, bail, Context, Result};

use inventory_core::{Inventory, NewProduct, Product, ProductChanges, SaleOutcome, SortOrder};

use crate::editor::{confirm, prompt_with_default};
use crate::output::Output;

/// Largest quantity the editor lets a product hold
pub const QUANTITY_MAX: i64 = 1000;

/// Fields given on the command line for `add`
pub struct AddArgs {
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    pub supplier: String,
    pub phone: Option<String>,
}

/// Fields given on the command line for `edit`
#[derive(Default)]
pub struct EditArgs {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub quantity: Option<i64>,
    pub supplier: Option<String>,
    pub phone: Option<String>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.supplier.is_none()
            && self.phone.is_none()
    }

    fn into_changes(self) -> ProductChanges {
        ProductChanges {
            name: self.name,
            price: self.price,
            quantity: self.quantity.map(|q| q.clamp(0, QUANTITY_MAX)),
            supplier_name: self.supplier,
            supplier_phone: self.phone.map(phone_change),
        }
    }
}

/// List products, optionally from one supplier
pub fn list(
    inventory: &Inventory,
    supplier: Option<String>,
    sort: SortOrder,
    output: &Output,
) -> Result<()> {
    let products = match supplier {
        Some(ref s) => inventory.products_by_supplier(s, sort)?,
        None => inventory.all_products(sort)?,
    };

    output.print_products(&products);
    Ok(())
}

/// Add a new product
pub fn add(inventory: &Inventory, args: AddArgs, output: &Output) -> Result<()> {
    let mut product = NewProduct::new(args.name, args.price, args.supplier)
        .with_quantity(args.quantity.clamp(0, QUANTITY_MAX));
    if let Some(phone) = args.phone {
        product = product.with_supplier_phone(phone);
    }

    let id = inventory
        .add_product(&product)?
        .ok_or_else(|| anyhow!("Error with saving product"))?;

    output.success(&format!("Product saved with id: {}", id));
    if let Some(product) = inventory.get_product(id)? {
        output.print_product(&product);
    }

    Ok(())
}

/// Show a single product
pub fn show(inventory: &Inventory, id: i64, output: &Output) -> Result<()> {
    let product = find(inventory, id)?;
    output.print_product(&product);
    Ok(())
}

/// Edit a product from flags, or interactively when none are given
pub fn edit(inventory: &Inventory, id: i64, args: EditArgs, output: &Output) -> Result<()> {
    let product = find(inventory, id)?;

    let changes = if !args.is_empty() {
        args.into_changes()
    } else if output.should_prompt() {
        prompt_changes(&product)?
    } else {
        bail!("Nothing to change. Pass at least one of --name, --price, --quantity, --supplier, --phone.");
    };

    if changes.is_empty() {
        output.message("No changes.");
        return Ok(());
    }

    if !inventory
        .update_product(id, &changes)
        .context("Error with updating product")?
    {
        bail!("Product not found: {}", id);
    }

    output.success("Product updated");
    output.print_product(&find(inventory, id)?);

    Ok(())
}

/// Sell one unit
pub fn sell(inventory: &Inventory, id: i64, output: &Output) -> Result<()> {
    match inventory.sell(id)? {
        SaleOutcome::Sold { remaining } => {
            output.success(&format!("Sold one. {} left in stock", remaining));
            Ok(())
        }
        SaleOutcome::OutOfStock => bail!("Product {} is out of stock", id),
        SaleOutcome::NotFound => bail!("Product not found: {}", id),
    }
}

/// Add to (or, with a negative amount, take from) a product's stock
pub fn restock(inventory: &Inventory, id: i64, amount: i64, output: &Output) -> Result<()> {
    let product = find(inventory, id)?;

    let target = clamp_quantity(product.quantity, amount);
    if target == product.quantity {
        output.message(&format!("Quantity unchanged at {}", product.quantity));
        return Ok(());
    }

    let quantity = inventory
        .adjust_quantity(id, target - product.quantity)?
        .ok_or_else(|| anyhow!("Product not found: {}", id))?;

    output.success(&format!("Quantity of {} is now {}", product.name, quantity));
    Ok(())
}

/// Delete one product
pub fn delete(inventory: &Inventory, id: i64, output: &Output) -> Result<()> {
    let product = find(inventory, id)?;

    // Confirm deletion
    if output.should_prompt() {
        println!("Delete product: {} - {}", product.id, product.name);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if !inventory
        .delete_product(id)
        .context("Error with deleting product")?
    {
        bail!("Product not found: {}", id);
    }

    output.success(&format!("Deleted product: {}", id));
    Ok(())
}

/// Delete every product
pub fn delete_all(inventory: &Inventory, output: &Output) -> Result<()> {
    if output.should_prompt() {
        let count = inventory.product_count()?;
        if count == 0 {
            output.message("No products to delete.");
            return Ok(());
        }
        if !confirm(&format!("Delete all {} product(s)?", count))? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let deleted = inventory.delete_all()?;
    output.success(&format!("Deleted {} product(s)", deleted));
    Ok(())
}

fn find(inventory: &Inventory, id: i64) -> Result<Product> {
    inventory
        .get_product(id)?
        .ok_or_else(|| anyhow!("Product not found: {}", id))
}

/// Apply a stock change, keeping the result within the editor's range
///
/// The limits only apply in the direction of the change, so stock already
/// outside the range is never moved the wrong way.
fn clamp_quantity(current: i64, amount: i64) -> i64 {
    let target = current.saturating_add(amount);
    if amount >= 0 {
        target.min(QUANTITY_MAX.max(current))
    } else {
        target.max(current.min(0))
    }
}

/// "" or "none" clears the phone
fn phone_change(phone: String) -> Option<String> {
    if phone.is_empty() || phone == "none" {
        None
    } else {
        Some(phone)
    }
}

fn prompt_changes(product: &Product) -> Result<ProductChanges> {
    println!("Editing product: {}", product.id);
    println!("Press Enter to keep current value, or type new value.\n");

    let mut changes = ProductChanges {
        name: prompt_with_default("Name", &product.name)?,
        ..Default::default()
    };

    if let Some(price) = prompt_with_default("Price", &product.price.to_string())? {
        changes.price = Some(
            price
                .parse()
                .with_context(|| format!("Price must be a whole number: '{}'", price))?,
        );
    }

    if let Some(quantity) = prompt_with_default("Quantity", &product.quantity.to_string())? {
        let quantity: i64 = quantity
            .parse()
            .with_context(|| format!("Quantity must be a whole number: '{}'", quantity))?;
        changes.quantity = Some(quantity.clamp(0, QUANTITY_MAX));
    }

    changes.supplier_name = prompt_with_default("Supplier", &product.supplier_name)?;

    let current_phone = product.supplier_phone.as_deref().unwrap_or("");
    changes.supplier_phone =
        prompt_with_default("Supplier phone ('none' to clear)", current_phone)?.map(phone_change);

    Ok(changes)
}
