use std::io::{Error, ErrorKind};

use log::info;
use nobody_is_perfect::{
    rest_api::ApiServer, CacheProvider, CacheProviderArgs, DataProviderFactory, Server,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let args = CacheProviderArgs::from_env()
        .map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))?;
    let data_provider = DataProviderFactory::create::<CacheProvider>(args)
        .map_err(|e| Error::new(ErrorKind::Other, e.to_string()))?;

    let mut api = ApiServer::from_env(data_provider);
    info!("Nobody is Perfect board tracker listening on {}", api.get_address());
    api.start().await
}
