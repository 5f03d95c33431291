use crate::api::{BlockDecoder, CoinParser, Configuration};
use crate::networks::{BlockFetch, Coin};
use crate::params::ParamRegistry;
use crate::parser::errors::{OpErrorKind, OpResult};
use crate::parser::proto::canonical::{Block, Tx};
use crate::rpc::ChainRpc;
use log::{debug, error, info};

///
/// Binds a `ChainRpc` to the parser of the chain the node runs.
///
pub struct RpcAdapter<R> {
    rpc: R,
    coin: Coin,
    parser: CoinParser,
    testnet: bool,
}

impl<R: ChainRpc> RpcAdapter<R> {
    ///
    /// Ask the node which chain it follows and build the matching parser.
    ///
    pub fn initialize(
        rpc: R,
        coin: Coin,
        config: &Configuration,
        registry: &ParamRegistry,
    ) -> OpResult<RpcAdapter<R>> {
        let chain_info = rpc.get_chain_info()?;
        info!("Chain name {}", chain_info.chain);

        let parser = CoinParser::with_config(coin, &chain_info.chain, config, registry)?;
        let testnet = *parser.params() != coin.chain_params("main", registry)?;
        info!("rpc: block chain {}", parser.params().name);

        Ok(RpcAdapter {
            rpc,
            coin,
            parser,
            testnet,
        })
    }

    #[inline]
    pub fn coin(&self) -> Coin {
        self.coin
    }

    #[inline]
    pub fn parser(&self) -> &CoinParser {
        &self.parser
    }

    #[inline]
    pub fn is_testnet(&self) -> bool {
        self.testnet
    }

    pub fn network(&self) -> &'static str {
        if self.testnet {
            "testnet"
        } else {
            "livenet"
        }
    }

    #[inline]
    pub fn estimate_fee_supported(&self) -> bool {
        self.parser.profile().supports_estimate_fee
    }

    ///
    /// Get a block by hash, or by height when `hash` is empty.
    ///
    /// Thin-fetch coins skip transactions the node reports as not found;
    /// any other failure aborts the whole block.
    ///
    pub fn get_block(&self, hash: &str, height: u32) -> OpResult<Block> {
        let hash = if hash.is_empty() && height > 0 {
            self.rpc.get_block_hash(height)?
        } else {
            hash.to_string()
        };

        match self.parser.profile().block_fetch {
            BlockFetch::Raw => {
                debug!("rpc: getblock (verbosity=0) {}", hash);
                let raw = self
                    .rpc
                    .get_raw_block(&hash)
                    .map_err(|e| e.join_msg(&format!("hash {}", hash)))?;
                let mut block = self.parser.parse_block(&raw)?;
                block.header.height = height;
                Ok(block)
            }
            BlockFetch::Thin => {
                debug!("rpc: getblock (verbosity=1) {}", hash);
                let thin = self
                    .rpc
                    .get_thin_block(&hash)
                    .map_err(|e| e.join_msg(&format!("hash {}", hash)))?;
                let mut txs = Vec::with_capacity(thin.txids.len());
                for txid in &thin.txids {
                    match self.rpc.get_transaction(txid) {
                        Ok(tx) => txs.push(tx),
                        Err(e) if e.kind() == OpErrorKind::TxNotFound => {
                            error!(
                                "rpc: getblock: skipping transaction in block {} due error: {}",
                                hash, e
                            );
                        }
                        Err(e) => return Err(e),
                    }
                }
                Ok(Block {
                    header: thin.header,
                    txs,
                })
            }
        }
    }

    pub fn get_transaction(&self, txid: &str) -> OpResult<Tx> {
        self.rpc.get_transaction(txid)
    }

    /// mempool transactions need no block time or confirmations
    pub fn get_transaction_for_mempool(&self, txid: &str) -> OpResult<Tx> {
        self.get_transaction(txid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FromHex, ToHex};
    use crate::parser::errors::OpError;
    use crate::parser::proto::canonical::BlockHeader;
    use crate::rpc::{ChainInfo, ThinBlock};
    use bitcoin::consensus::encode::serialize;
    use bitcoin::hashes::Hash;
    use bitcoin::{BlockHash, TxMerkleNode};
    use std::collections::HashMap;

    const TX_HEX: &str = "020000000001010914dec60b361360f04cf43b12063ae3bb2532facb640ef030c358453c8f3bc90100000017160014f6eb6d8f7413e5da585b82e2213291d0600e65f7feffffff02d00705000000000017a914b9ee7e29e9fa3209e2ebc232280a3ee046ea66448744ce01000000000017a91442c360a174b3e07e1abca0ad6fe83d22c26d62fb8702473044022075f19d2c93e23936bc271470eb41f86db694ec3127f1de1294464219a1cf220402200ca5926dfd3ff8607e3633cb58b57625014a5d5478a1269c2078d59f3e3145e50121038c629a5b4bbffacb322b36d88e4b00af43a95a2e08b13dc69d61621035f265b6f5250000";
    const TXID: &str = "9040141a87ab9f0e40ddb049818ebedc8c6124e02631144e83d2d52d76a3f588";

    #[derive(Default)]
    struct MockRpc {
        chain: String,
        hashes: HashMap<u32, String>,
        raw_blocks: HashMap<String, Vec<u8>>,
        thin_blocks: HashMap<String, ThinBlock>,
        txs: HashMap<String, Tx>,
        broken_txs: Vec<String>,
    }

    impl ChainRpc for MockRpc {
        fn get_chain_info(&self) -> OpResult<ChainInfo> {
            Ok(ChainInfo {
                chain: self.chain.clone(),
                blocks: 0,
                bestblockhash: String::new(),
            })
        }

        fn get_block_hash(&self, height: u32) -> OpResult<String> {
            self.hashes
                .get(&height)
                .cloned()
                .ok_or_else(|| OpError::from("block not found"))
        }

        fn get_raw_block(&self, hash: &str) -> OpResult<Vec<u8>> {
            self.raw_blocks
                .get(hash)
                .cloned()
                .ok_or_else(|| OpError::from("block not found"))
        }

        fn get_thin_block(&self, hash: &str) -> OpResult<ThinBlock> {
            self.thin_blocks
                .get(hash)
                .cloned()
                .ok_or_else(|| OpError::from("block not found"))
        }

        fn get_transaction(&self, txid: &str) -> OpResult<Tx> {
            if self.broken_txs.iter().any(|t| t == txid) {
                return Err(OpError::from("connection reset"));
            }
            self.txs
                .get(txid)
                .cloned()
                .ok_or_else(|| OpError::new(OpErrorKind::TxNotFound).join_msg(txid))
        }
    }

    fn sample_tx(coin: Coin) -> Tx {
        let registry = ParamRegistry::new();
        let parser = coin.parser("main", &registry).unwrap();
        parser.parse_tx(&Vec::<u8>::from_hex(TX_HEX).unwrap()).unwrap()
    }

    fn raw_block() -> (String, Vec<u8>) {
        let tx: bitcoin::Transaction =
            bitcoin::consensus::deserialize(&Vec::<u8>::from_hex(TX_HEX).unwrap()).unwrap();
        let block = bitcoin::Block {
            header: bitcoin::BlockHeader {
                version: 0x2000_0000,
                prev_blockhash: BlockHash::from_inner([7u8; 32]),
                merkle_root: TxMerkleNode::from_inner([0u8; 32]),
                time: 1_600_000_000,
                bits: 0x1d00_ffff,
                nonce: 42,
            },
            txdata: vec![tx],
        };
        (block.block_hash().to_hex(), serialize(&block))
    }

    fn thin_block(hash: &str, txids: &[&str]) -> ThinBlock {
        ThinBlock {
            header: BlockHeader {
                hash: hash.to_string(),
                prev: "00".repeat(32),
                height: 5,
                size: 300,
                time: 1_600_000_000,
            },
            txids: txids.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_initialize_networks() {
        let registry = ParamRegistry::new();
        let config = Configuration::from_json(r#"{"coin_name": "Reddcoin"}"#).unwrap();

        let rpc = MockRpc {
            chain: "main".to_string(),
            ..MockRpc::default()
        };
        let adapter = RpcAdapter::initialize(rpc, Coin::Reddcoin, &config, &registry).unwrap();
        assert_eq!(adapter.network(), "livenet");
        assert!(!adapter.is_testnet());

        let rpc = MockRpc {
            chain: "test".to_string(),
            ..MockRpc::default()
        };
        let adapter = RpcAdapter::initialize(rpc, Coin::Reddcoin, &config, &registry).unwrap();
        assert_eq!(adapter.network(), "testnet");
        assert_eq!(adapter.parser().params().net, 0x0054_5048);
    }

    #[test]
    fn test_get_raw_block_by_height() {
        let registry = ParamRegistry::new();
        let config = Configuration::from_json(r#"{"coin_name": "BTCV"}"#).unwrap();
        let (hash, raw) = raw_block();
        let mut rpc = MockRpc {
            chain: "main".to_string(),
            ..MockRpc::default()
        };
        rpc.hashes.insert(100, hash.clone());
        rpc.raw_blocks.insert(hash.clone(), raw);

        let adapter = RpcAdapter::initialize(rpc, Coin::Bitcoinvault, &config, &registry).unwrap();
        assert!(adapter.estimate_fee_supported());
        let block = adapter.get_block("", 100).unwrap();
        assert_eq!(block.header.hash, hash);
        assert_eq!(block.header.height, 100);
        assert_eq!(block.txs.len(), 1);
        assert_eq!(block.txs[0].txid, TXID);

        let err = adapter.get_block("ff", 0).unwrap_err();
        assert!(err.message().contains("hash ff"));
    }

    #[test]
    fn test_thin_block_skips_missing_transactions() {
        let registry = ParamRegistry::new();
        let config = Configuration::from_json(r#"{"coin_name": "Verge"}"#).unwrap();
        let mut rpc = MockRpc {
            chain: "main".to_string(),
            ..MockRpc::default()
        };
        rpc.thin_blocks
            .insert("aa".to_string(), thin_block("aa", &[TXID, "missing"]));
        rpc.txs.insert(TXID.to_string(), sample_tx(Coin::Verge));

        let adapter = RpcAdapter::initialize(rpc, Coin::Verge, &config, &registry).unwrap();
        assert!(!adapter.estimate_fee_supported());
        let block = adapter.get_block("aa", 5).unwrap();
        assert_eq!(block.header.height, 5);
        assert_eq!(block.txs.len(), 1);
        assert_eq!(block.txs[0].txid, TXID);
    }

    #[test]
    fn test_thin_block_aborts_on_rpc_failure() {
        let registry = ParamRegistry::new();
        let config = Configuration::from_json(r#"{"coin_name": "Verge"}"#).unwrap();
        let mut rpc = MockRpc {
            chain: "main".to_string(),
            ..MockRpc::default()
        };
        rpc.thin_blocks
            .insert("bb".to_string(), thin_block("bb", &[TXID, "flaky"]));
        rpc.txs.insert(TXID.to_string(), sample_tx(Coin::Verge));
        rpc.broken_txs.push("flaky".to_string());

        let adapter = RpcAdapter::initialize(rpc, Coin::Verge, &config, &registry).unwrap();
        let err = adapter.get_block("bb", 0).unwrap_err();
        assert_eq!(err.kind(), OpErrorKind::RuntimeError);

        let err = adapter.get_transaction_for_mempool("missing").unwrap_err();
        assert_eq!(err.kind(), OpErrorKind::TxNotFound);
        assert_eq!(
            adapter.get_transaction_for_mempool(TXID).unwrap(),
            sample_tx(Coin::Verge)
        );
    }
}
