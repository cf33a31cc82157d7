use crate::data::model::{CellValue, Frame, FrameError};

// ---------------------------------------------------------------------------
// Frame session – a Spark-flavoured entry point for tabular work
// ---------------------------------------------------------------------------
//
// Everything runs in-process; the session exists so frame construction and
// teardown have one owner with a name that shows up in the logs. One session
// per run, stopped before exit.

/// Builder for [`Session`], mirroring the `builder().app_name(...).get_or_create()`
/// construction idiom of distributed dataframe engines.
#[derive(Debug, Default)]
pub struct SessionBuilder {
    app_name: Option<String>,
}

impl SessionBuilder {
    /// Name the session; appears in log output.
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Finish the builder and start the session.
    pub fn get_or_create(self) -> Session {
        let app_name = self.app_name.unwrap_or_else(|| "rusty-datalab".to_string());
        log::info!("session '{app_name}' started");
        Session { app_name }
    }
}

/// An active frame session.
#[derive(Debug)]
pub struct Session {
    app_name: String,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Build a frame from row-major cells and column names.
    pub fn create_frame(
        &self,
        rows: Vec<Vec<CellValue>>,
        columns: &[&str],
    ) -> Result<Frame, FrameError> {
        let frame = Frame::new(columns.to_vec(), rows)?;
        log::debug!(
            "session '{}': created frame with {} rows × {} columns",
            self.app_name,
            frame.len(),
            frame.n_columns()
        );
        Ok(frame)
    }

    /// Tear the session down. Consumes the session so no frame can be
    /// created through it afterwards.
    pub fn stop(self) {
        log::info!("session '{}' stopped", self.app_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::col;

    #[test]
    fn builder_defaults_the_app_name() {
        let session = Session::builder().get_or_create();
        assert_eq!(session.app_name(), "rusty-datalab");
        let named = Session::builder().app_name("demo").get_or_create();
        assert_eq!(named.app_name(), "demo");
    }

    #[test]
    fn create_filter_stop_round() {
        let session = Session::builder().app_name("test").get_or_create();
        let frame = session
            .create_frame(
                vec![
                    vec!["Alice".into(), 25.into()],
                    vec!["Bob".into(), 30.into()],
                    vec!["Charlie".into(), 35.into()],
                ],
                &["Name", "Age"],
            )
            .unwrap();

        let filtered = frame.filter(&[col("Age").gt(30)]).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(
            filtered.row(0)["Name"],
            CellValue::String("Charlie".into())
        );
        session.stop();
    }

    #[test]
    fn ragged_rows_are_rejected_at_creation() {
        let session = Session::builder().get_or_create();
        let err = session
            .create_frame(vec![vec![1.into()], vec![1.into(), 2.into()]], &["A"])
            .unwrap_err();
        assert!(matches!(err, FrameError::RaggedRow { .. }));
        session.stop();
    }
}
