//! Load balancers and pools

use super::{Resource, required};
use crate::{
    args::Arguments,
    client::Client,
    error::Result,
    http::Request,
    types::{LoadBalancer, LoadBalancerPool, LoadBalancerSpec, PoolSpec},
};
use serde::Serialize;
use tracing::debug;

/// Load balancers.
#[derive(Clone)]
pub struct LoadBalancers {
    client: Client,
}

#[derive(Serialize)]
struct CreateLoadBalancer<'a> {
    vdc: &'a str,
    #[serde(flatten)]
    spec: &'a LoadBalancerSpec,
}

impl LoadBalancers {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every load balancer.
    pub async fn list(&self, extra: Arguments) -> Result<Vec<LoadBalancer>> {
        self.client.get_all_pages("v1/lbaas", extra).await
    }

    /// One load balancer.
    pub async fn get(&self, id: &str) -> Result<LoadBalancer> {
        self.client
            .get(&format!("v1/lbaas/{}", id), Arguments::defaults())
            .await
    }

    /// Create a load balancer in a VDC.
    pub async fn create(&self, vdc_id: &str, spec: &LoadBalancerSpec) -> Result<LoadBalancer> {
        let request = Request::post("v1/lbaas").json(&CreateLoadBalancer { vdc: vdc_id, spec })?;
        required(self.client.execute_and_wait(request).await?, "v1/lbaas")
    }

    /// Delete a load balancer.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("v1/lbaas/{}", id)))
            .await
    }

    /// Pools of a load balancer. This endpoint is not paginated.
    pub async fn pools(&self, load_balancer_id: &str) -> Result<Vec<LoadBalancerPool>> {
        let pools: Vec<LoadBalancerPool> = self
            .client
            .get(&format!("v1/lbaas/{}/pool", load_balancer_id), Arguments::defaults())
            .await?;
        Ok(pools
            .into_iter()
            .map(|mut pool| {
                pool.load_balancer_id = load_balancer_id.to_string();
                pool
            })
            .collect())
    }

    /// Add a pool.
    pub async fn create_pool(&self, load_balancer_id: &str, spec: &PoolSpec) -> Result<LoadBalancerPool> {
        let path = format!("v1/lbaas/{}/pool", load_balancer_id);
        let request = Request::post(&path).json(spec)?;
        let mut pool: LoadBalancerPool = required(self.client.execute_and_wait(request).await?, &path)?;
        pool.load_balancer_id = load_balancer_id.to_string();
        Ok(pool)
    }

    /// Delete every pool of a load balancer, one at a time. Stops at the first failure.
    pub async fn delete_pools(&self, load_balancer_id: &str) -> Result<()> {
        for pool in self.pools(load_balancer_id).await? {
            debug!(load_balancer_id, pool_id = %pool.id, "Deleting pool");
            self.client
                .execute_unit_and_wait(Request::delete(format!(
                    "v1/lbaas/{}/pool/{}",
                    load_balancer_id, pool.id
                )))
                .await?;
        }
        Ok(())
    }

    /// Wait until the load balancer is no longer locked.
    pub async fn wait_unlocked(&self, id: &str) -> Result<()> {
        self.client.await_unlocked(&format!("v1/lbaas/{}", id)).await
    }
}

impl Resource for LoadBalancers {
    fn client(&self) -> &Client {
        &self.client
    }
}
