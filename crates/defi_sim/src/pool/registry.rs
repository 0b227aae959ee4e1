use crate::pool::model::{PoolError, StakingPool};
use std::collections::BTreeMap;

/// Immutable id → pool mapping, built once at startup.
#[derive(Clone, Debug)]
pub struct PoolRegistry {
    pools: BTreeMap<i64, StakingPool>,
    fallback_pool_id: Option<i64>,
}

impl PoolRegistry {
    /// Build a registry, validating each pool and rejecting duplicate ids.
    pub fn new(
        pools: impl IntoIterator<Item = StakingPool>,
        fallback_pool_id: Option<i64>,
    ) -> Result<Self, PoolError> {
        let mut map = BTreeMap::new();
        for pool in pools {
            pool.validate()?;
            let id = pool.id;
            if map.insert(id, pool).is_some() {
                return Err(PoolError::DuplicatePoolId(id));
            }
        }
        if let Some(id) = fallback_pool_id {
            if !map.contains_key(&id) {
                return Err(PoolError::UnknownFallback(id));
            }
        }
        Ok(Self {
            pools: map,
            fallback_pool_id,
        })
    }

    /// Exact lookup by id.
    pub fn get(&self, pool_id: i64) -> Option<&StakingPool> {
        self.pools.get(&pool_id)
    }

    /// Lookup by id, falling back to the configured fallback pool when set.
    pub fn resolve(&self, pool_id: i64) -> Option<&StakingPool> {
        self.get(pool_id)
            .or_else(|| self.fallback_pool_id.and_then(|id| self.pools.get(&id)))
    }

    pub fn fallback_pool_id(&self) -> Option<i64> {
        self.fallback_pool_id
    }

    /// Pools ordered by id.
    pub fn pools(&self) -> impl Iterator<Item = &StakingPool> {
        self.pools.values()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// The built-in ETH pool; every id resolves to it.
impl Default for PoolRegistry {
    fn default() -> Self {
        let pool = StakingPool::eth_default();
        let id = pool.id;
        Self {
            pools: BTreeMap::from([(id, pool)]),
            fallback_pool_id: Some(id),
        }
    }
}
