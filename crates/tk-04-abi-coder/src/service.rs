//! # ABI Coder Service
//!
//! Application service layer that implements the `AbiCoderApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`AbiCoderApi`)
//! - Uses the outbound port (`WordCoder`) for word packing
//! - Applies `AbiConfig` defaults

use crate::adapters::ethabi_coder::EthabiWordCoder;
use crate::domain::abi::AbiFunction;
use crate::domain::config::AbiConfig;
use crate::domain::errors::AbiError;
use crate::domain::v2::DecodedOutputs;
use crate::domain::{params, v2};
use crate::ports::inbound::AbiCoderApi;
use crate::ports::outbound::WordCoder;
use serde_json::Value;
use tracing::debug;

/// ABI Coder Service.
#[derive(Clone, Debug)]
pub struct AbiCoderService<C: WordCoder = EthabiWordCoder> {
    coder: C,
    config: AbiConfig,
}

impl AbiCoderService<EthabiWordCoder> {
    /// Service backed by the `ethabi` word coder.
    pub fn with_config(config: AbiConfig) -> Self {
        Self::new(EthabiWordCoder, config)
    }
}

impl Default for AbiCoderService<EthabiWordCoder> {
    fn default() -> Self {
        Self::with_config(AbiConfig::default())
    }
}

impl<C: WordCoder> AbiCoderService<C> {
    /// Create a new ABI coder service.
    ///
    /// # Arguments
    /// * `coder` - The word coder that packs values
    /// * `config` - Decoding and argument defaults
    pub fn new(coder: C, config: AbiConfig) -> Self {
        Self { coder, config }
    }

    pub fn config(&self) -> &AbiConfig {
        &self.config
    }
}

impl<C: WordCoder> AbiCoderApi for AbiCoderService<C> {
    fn encode_params(&self, types: &[&str], values: &[Value]) -> Result<Vec<u8>, AbiError> {
        debug!(types = ?types, "Encoding positional parameters");
        params::encode_params(types, values, &self.coder)
    }

    fn decode_params(
        &self,
        names: &[&str],
        types: &[&str],
        data: &[u8],
    ) -> Result<Value, AbiError> {
        debug!(
            types = ?types,
            len = data.len(),
            ignore_method_hash = self.config.ignore_method_hash,
            "Decoding positional parameters"
        );
        params::decode_params(
            names,
            types,
            data,
            self.config.ignore_method_hash,
            &self.coder,
        )
    }

    fn encode_params_v2_by_abi(
        &self,
        function: &AbiFunction,
        args: &[Value],
    ) -> Result<Vec<u8>, AbiError> {
        debug!(
            function = %function.name,
            args = args.len(),
            inputs = function.inputs.len(),
            "Encoding parameters by ABI"
        );
        v2::encode_params_v2_by_abi(function, args, self.config.strict_arguments, &self.coder)
    }

    fn decode_params_v2_by_abi(
        &self,
        function: &AbiFunction,
        data: &[u8],
    ) -> Result<DecodedOutputs, AbiError> {
        debug!(function = %function.name, len = data.len(), "Decoding outputs by ABI");
        v2::decode_params_v2_by_abi(function, data, self.config.ignore_method_hash, &self.coder)
    }

    fn encode_call(&self, function: &AbiFunction, args: &[Value]) -> Result<Vec<u8>, AbiError> {
        let mut call = function.selector()?.to_vec();
        call.extend(self.encode_params_v2_by_abi(function, args)?);
        Ok(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::abi::AbiParam;
    use serde_json::json;

    fn transfer() -> AbiFunction {
        AbiFunction::new("transfer").with_inputs(vec![
            AbiParam::new("_to", "address"),
            AbiParam::new("_value", "uint256"),
        ])
    }

    #[test]
    fn test_encode_call_prefixes_selector() {
        let service = AbiCoderService::with_config(AbiConfig::default());
        let call = service
            .encode_call(
                &transfer(),
                &[json!("TPL66VK2gCXNCD7EJg9pgJRfqcRazjhUZY"), json!(1)],
            )
            .unwrap();

        assert_eq!(call.len(), 4 + 64);
        assert_eq!(hex::encode(&call[..4]), "a9059cbb");
    }

    #[test]
    fn test_configured_method_hash_stripping() {
        let config = AbiConfig::default().with_ignore_method_hash(true);
        let service = AbiCoderService::with_config(config);
        let call = service
            .encode_call(
                &transfer(),
                &[json!("TPL66VK2gCXNCD7EJg9pgJRfqcRazjhUZY"), json!(7)],
            )
            .unwrap();

        let decoded = service
            .decode_params(&["to", "value"], &["address", "uint256"], &call)
            .unwrap();
        assert_eq!(
            decoded,
            json!({"to": "41928c9af0651632157ef27a2cf17ca72c575a4d21", "value": 7})
        );
    }

    #[test]
    fn test_strict_arguments() {
        let config = AbiConfig::default().with_strict_arguments(true);
        let service = AbiCoderService::with_config(config);
        let args = [json!("TPL66VK2gCXNCD7EJg9pgJRfqcRazjhUZY")];

        assert!(matches!(
            service.encode_params_v2_by_abi(&transfer(), &args),
            Err(AbiError::MissingArgument { index: 1, .. })
        ));
    }

    #[test]
    fn test_service_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AbiCoderService>();
    }
}
