//! Format registry and conversion dispatch.

use indexmap::IndexMap;
use octopus_schema::Schema;
use tracing::debug;

use crate::Format;
use crate::codec::{Decoder, Encoder, GeneratedFile};
use crate::decode::{OctopusDecoder, XlsxDecoder};
use crate::encode::{
    DbmlEncoder, GraphqlEncoder, JpaKotlinEncoder, OctopusEncoder, PlantumlEncoder, ProtobufEncoder,
    SqlDialect, SqlEncoder, XlsxEncoder,
};
use crate::error::{CodecError, CodecResult};
use crate::options::EncodeOptions;

/// Maps format identifiers to codec implementations.
pub struct Registry {
    decoders: IndexMap<Format, Box<dyn Decoder>>,
    encoders: IndexMap<Format, Box<dyn Encoder>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            decoders: IndexMap::new(),
            encoders: IndexMap::new(),
        }
    }

    /// Create a registry with every built-in codec.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();

        registry.register_decoder(OctopusDecoder);
        registry.register_decoder(XlsxDecoder);

        registry.register_encoder(OctopusEncoder);
        registry.register_encoder(XlsxEncoder);
        registry.register_encoder(GraphqlEncoder);
        registry.register_encoder(ProtobufEncoder);
        registry.register_encoder(JpaKotlinEncoder);
        registry.register_encoder(PlantumlEncoder);
        registry.register_encoder(DbmlEncoder);
        for dialect in SqlDialect::ALL {
            registry.register_encoder(SqlEncoder::new(dialect));
        }

        registry
    }

    /// Register a decoder, replacing any decoder for the same format.
    pub fn register_decoder(&mut self, decoder: impl Decoder + 'static) {
        self.decoders.insert(decoder.format(), Box::new(decoder));
    }

    /// Register an encoder, replacing any encoder for the same format.
    pub fn register_encoder(&mut self, encoder: impl Encoder + 'static) {
        self.encoders.insert(encoder.format(), Box::new(encoder));
    }

    /// Get the decoder for a format.
    pub fn decoder(&self, format: Format) -> Option<&dyn Decoder> {
        self.decoders.get(&format).map(|d| d.as_ref())
    }

    /// Get the encoder for a format.
    pub fn encoder(&self, format: Format) -> Option<&dyn Encoder> {
        self.encoders.get(&format).map(|e| e.as_ref())
    }

    /// Formats that can be decoded.
    pub fn decoder_formats(&self) -> impl Iterator<Item = Format> + '_ {
        self.decoders.keys().copied()
    }

    /// Formats that can be encoded.
    pub fn encoder_formats(&self) -> impl Iterator<Item = Format> + '_ {
        self.encoders.keys().copied()
    }

    /// Resolve a decoder by identifier.
    pub fn resolve_decoder(&self, name: &str) -> CodecResult<&dyn Decoder> {
        let format = Format::from_name(name)?;
        self.decoder(format)
            .ok_or_else(|| CodecError::unsupported_conversion(format, "source"))
    }

    /// Resolve an encoder by identifier.
    pub fn resolve_encoder(&self, name: &str) -> CodecResult<&dyn Encoder> {
        let format = Format::from_name(name)?;
        self.encoder(format)
            .ok_or_else(|| CodecError::unsupported_conversion(format, "target"))
    }

    /// Check that a conversion can run before any I/O happens.
    pub fn check_conversion(&self, source: Format, target: Format) -> CodecResult<()> {
        if self.decoder(source).is_none() {
            return Err(CodecError::unsupported_conversion(source, "source"));
        }
        if self.encoder(target).is_none() {
            return Err(CodecError::unsupported_conversion(target, "target"));
        }
        Ok(())
    }

    /// Decode with the decoder registered for `format`.
    pub fn decode(&self, format: Format, source: &[u8]) -> CodecResult<Schema> {
        let decoder = self
            .decoder(format)
            .ok_or_else(|| CodecError::unsupported_conversion(format, "source"))?;
        debug!("decoding {} bytes as {}", source.len(), format);
        decoder.decode(source)
    }

    /// Encode with the encoder registered for `format`.
    pub fn encode(
        &self,
        format: Format,
        schema: &Schema,
        options: &EncodeOptions,
    ) -> CodecResult<Vec<GeneratedFile>> {
        let encoder = self
            .encoder(format)
            .ok_or_else(|| CodecError::unsupported_conversion(format, "target"))?;
        debug!("encoding {} as {}", schema.stats(), format);
        encoder.encode(schema, options)
    }

    /// Decode `source` and re-encode it as a single document.
    pub fn convert(
        &self,
        source_format: Format,
        source: &[u8],
        target_format: Format,
        options: &EncodeOptions,
    ) -> CodecResult<GeneratedFile> {
        self.check_conversion(source_format, target_format)?;
        if !target_format.is_single_document() {
            return Err(CodecError::unsupported_conversion(
                target_format,
                "single-document target",
            ));
        }

        let schema = self.decode(source_format, source)?;
        let mut files = self.encode(target_format, &schema, options)?;
        match files.len() {
            1 => Ok(files.remove(0)),
            _ => Err(CodecError::unsupported_conversion(
                target_format,
                "single-document target",
            )),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("decoders", &self.decoders.keys().collect::<Vec<_>>())
            .field("encoders", &self.encoders.keys().collect::<Vec<_>>())
            .finish()
    }
}
