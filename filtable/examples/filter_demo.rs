use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use simplelog::{Config, LevelFilter, WriteLogger};

use filtable::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Set up file logging
    let log_file = File::create("filter_demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let table = MemoryTable::new();
    table.push_row(vec![
        MemoryCell::new("Apple"),
        MemoryCell::new("Fruit"),
        MemoryCell::new("In stock").with_override("yes"),
    ]);
    table.push_row(vec![
        MemoryCell::new("Banana"),
        MemoryCell::new("Fruit"),
        MemoryCell::new("Sold out").with_override("no"),
    ]);
    table.push_row(vec![
        MemoryCell::new("Carrot"),
        MemoryCell::new("Vegetable"),
        MemoryCell::new("In stock").with_override("yes"),
    ]);
    table.push_row(vec![
        MemoryCell::new("Apple Pie"),
        MemoryCell::new("Pastry"),
        MemoryCell::new("Sold out").with_override("no"),
    ]);

    let search = Control::text().with_hash_key("q");
    let category = Control::select().with_columns([1]).with_hash_key("cat");
    let in_stock = Control::checkbox("yes")
        .with_columns([2])
        .with_hash_key("stock");

    // Pretend the page was opened with a fragment from a shared link
    let host = Arc::new(MemoryFragmentHost::with_fragment("q=ap"));

    let widget = Filtable::builder(Arc::new(table.clone()))
        .controls([search.clone(), category.clone(), in_stock.clone()])
        .zebra_striping(true)
        .fragment_host(Arc::clone(&host) as Arc<dyn FragmentHost>)
        .build()?;

    widget.subscribe(|event| match event {
        FilterEvent::Before => println!("filtering..."),
        FilterEvent::After(counts) => {
            println!("{} of {} rows visible", counts.visible_rows, counts.total_rows);
        }
    });

    println!("== initial pass (fragment #{}) ==", host.fragment());
    widget.refresh()?;
    tokio::time::sleep(Duration::from_millis(50)).await;
    print_table(&table);

    println!("== in-stock toggle on ==");
    in_stock.set_active(true);
    widget.control_changed(&in_stock)?;
    tokio::time::sleep(Duration::from_millis(50)).await;
    print_table(&table);
    println!("fragment is now #{}", host.fragment());

    println!("== search cleared ==");
    search.set_value("");
    widget.control_changed(&search)?;
    tokio::time::sleep(Duration::from_millis(50)).await;
    print_table(&table);
    println!("fragment is now #{}", host.fragment());

    Ok(())
}

fn print_table(table: &MemoryTable) {
    for row in table.visible_rows() {
        let stripe = table
            .row_stripe(row)
            .map(|s| s.class_name())
            .unwrap_or("-");
        let cells: Vec<String> = (0..table.cell_count(row))
            .filter_map(|col| table.cell_text(row, col))
            .collect();
        println!("  [{stripe:>4}] {}", cells.join(" | "));
    }
}
