use crate::params::NetworkParams;
use crate::parser::errors::{OpError, OpErrorKind, OpResult};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::RwLock;

///
/// Table of registered network parameter sets, keyed by network magic.
///
/// Registration is idempotent: registering an identical set again is a
/// no-op. Only a *different* set under an already used magic fails.
///
/// The registry is an explicit value: create one at start-up and hand it
/// to whatever resolves chain parameters.
///
#[derive(Default)]
pub struct ParamRegistry {
    nets: RwLock<HashMap<u32, NetworkParams>>,
}

impl ParamRegistry {
    pub fn new() -> ParamRegistry {
        ParamRegistry::default()
    }

    pub fn register(&self, params: &NetworkParams) -> OpResult<()> {
        let mut nets = self
            .nets
            .write()
            .map_err(|_| OpError::from("param registry lock poisoned"))?;
        match nets.get(&params.net) {
            Some(existing) if existing == params => Ok(()),
            Some(existing) => {
                warn!(
                    "network magic {:#010x} already registered as {}, refusing {}",
                    params.net, existing.name, params.name
                );
                Err(OpError::new(OpErrorKind::AlreadyRegisteredConflict).join_msg(
                    &format!(
                        "magic {:#010x} is registered as {}",
                        params.net, existing.name
                    ),
                ))
            }
            None => {
                info!("registered network {} ({:#010x})", params.name, params.net);
                nets.insert(params.net, params.clone());
                Ok(())
            }
        }
    }

    pub fn is_registered(&self, params: &NetworkParams) -> bool {
        match self.nets.read() {
            Ok(nets) => nets.get(&params.net) == Some(params),
            Err(_) => false,
        }
    }

    pub fn lookup(&self, net: u32) -> Option<NetworkParams> {
        self.nets.read().ok()?.get(&net).cloned()
    }

    pub fn len(&self) -> usize {
        self.nets.read().map(|nets| nets.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_register_idempotent() {
        let registry = ParamRegistry::new();
        let params = NetworkParams::bitcoin_mainnet();
        registry.register(&params).unwrap();
        registry.register(&params).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.is_registered(&params));
        assert_eq!(registry.lookup(params.net), Some(params));
    }

    #[test]
    fn test_register_conflict() {
        let registry = ParamRegistry::new();
        let params = NetworkParams::bitcoin_mainnet();
        registry.register(&params).unwrap();

        let mut other = params.clone();
        other.name = "impostor".to_string();
        other.pubkey_hash_addr_id = vec![0x30];
        let err = registry.register(&other).unwrap_err();
        assert_eq!(err.kind(), OpErrorKind::AlreadyRegisteredConflict);
        assert!(!registry.is_registered(&other));
        assert_eq!(registry.lookup(params.net), Some(params));
    }

    #[test]
    fn test_concurrent_register() {
        let registry = Arc::new(ParamRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || registry.register(&NetworkParams::bitcoin_mainnet()))
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap().is_ok());
        }
        assert_eq!(registry.len(), 1);
    }
}
