use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use rusty_datalab::data::synth;

/// Write the demo point cloud to `points.parquet` so the viewer's
/// File → Open… path has something to load.
fn main() -> Result<()> {
    env_logger::init();

    let points = synth::point_cloud(synth::DEMO_SEED);

    let x_array = Float64Array::from(points.iter().map(|p| p[0]).collect::<Vec<_>>());
    let y_array = Float64Array::from(points.iter().map(|p| p[1]).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(x_array), Arc::new(y_array)])
        .context("building record batch")?;

    let output_path = "points.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;

    println!("Wrote {} points to {output_path}", points.len());
    Ok(())
}
