use anyhow::Result;

use rusty_datalab::data::filter::col;
use rusty_datalab::session::Session;

/// Frame session demo: build a small (Name, Age) frame, preview it, filter
/// for Age > 30, preview the result, stop the session.
fn main() -> Result<()> {
    env_logger::init();

    let session = Session::builder()
        .app_name("session-filter-demo")
        .get_or_create();

    let frame = session.create_frame(
        vec![
            vec!["Alice".into(), 25.into()],
            vec!["Bob".into(), 30.into()],
            vec!["Charlie".into(), 35.into()],
        ],
        &["Name", "Age"],
    )?;
    println!("Initial frame:");
    frame.show(None);

    let filtered = frame.filter(&[col("Age").gt(30)])?;
    println!("Filtered frame (Age > 30):");
    filtered.show(None);

    session.stop();
    Ok(())
}
