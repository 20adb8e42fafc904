use std::marker::PhantomData;

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;
use thiserror::Error;

use crate::parallax::config::SegmentConfigError;

#[derive(Debug, Error)]
pub enum RonLoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid definition: {0}")]
    Invalid(#[from] SegmentConfigError),
}

/// Assets that must pass a semantic check after parsing.
pub trait ValidatedAsset {
    fn validate(&self) -> Result<(), SegmentConfigError>;
}

/// Loads any `Deserialize` asset from RON and rejects it if validation fails.
#[derive(TypePath)]
pub struct RonLoader<T: TypePath> {
    extensions: Vec<&'static str>,
    _phantom: PhantomData<T>,
}

impl<T: TypePath> RonLoader<T> {
    pub fn new(extensions: &[&'static str]) -> Self {
        Self {
            extensions: extensions.to_vec(),
            _phantom: PhantomData,
        }
    }
}

/// Parse and validate a RON document.
pub fn parse_validated<T>(bytes: &[u8]) -> Result<T, RonLoaderError>
where
    T: ValidatedAsset + for<'de> Deserialize<'de>,
{
    let asset = ron::de::from_bytes::<T>(bytes)?;
    asset.validate()?;
    Ok(asset)
}

impl<T> AssetLoader for RonLoader<T>
where
    T: Asset + TypePath + ValidatedAsset + for<'de> Deserialize<'de> + Send + Sync + 'static,
{
    type Asset = T;
    type Settings = ();
    type Error = RonLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        parse_validated::<T>(&bytes)
    }

    fn extensions(&self) -> &[&str] {
        &self.extensions
    }
}
