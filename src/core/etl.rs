use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs all three phases; any error stops the run before the aggregate is written.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting pokedex ETL run");

        // Extract
        let entries = self.pipeline.extract().await?;

        // Transform
        let entities = self.pipeline.transform(entries).await?;

        // Load
        let output_path = self.pipeline.load(entities).await?;
        tracing::info!(
            "Aggregate saved to {} in {:.2?}",
            output_path,
            started.elapsed()
        );

        Ok(output_path)
    }
}
