//! CLI tool for deploying and interacting with the stable engine contracts.

use stable_engine_contracts::engine::StableEngine;
use stable_engine_contracts::price_feed::MockPriceFeed;
use stable_engine_contracts::stable_token::StableToken;
use stable_engine_contracts::token::CollateralToken;
use odra::casper_types::U256;
use odra::prelude::{Address, Addressable};
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// ETH/USD answer used for the local feed: $2000 with 8 decimals
const LOCAL_ETH_USD_PRICE: i64 = 2000_0000_0000;

/// Deploys the stable token.
pub struct StableTokenDeployScript;

impl DeployScript for StableTokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use stable_engine_contracts::stable_token::StableTokenInitArgs;

        let _stable = StableToken::load_or_deploy(
            &env,
            StableTokenInitArgs {
                name: String::from("Decentralized Stable Coin"),
                symbol: String::from("DSC"),
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys a WETH collateral token and its ETH/USD feed for local networks.
pub struct LocalCollateralDeployScript;

impl DeployScript for LocalCollateralDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use stable_engine_contracts::price_feed::MockPriceFeedInitArgs;
        use stable_engine_contracts::token::CollateralTokenInitArgs;

        let _weth = CollateralToken::load_or_deploy(
            &env,
            CollateralTokenInitArgs {
                name: String::from("Wrapped Ether"),
                symbol: String::from("WETH"),
            },
            container,
            300_000_000_000
        )?;

        let _feed = MockPriceFeed::load_or_deploy(
            &env,
            MockPriceFeedInitArgs {
                decimals: 8,
                initial_price: LOCAL_ETH_USD_PRICE,
            },
            container,
            200_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the engine over the deployed collateral and binds the stable
/// token's minter to it.
/// Requires the stable token and the collateral to be deployed first.
pub struct EngineDeployScript;

impl DeployScript for EngineDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use stable_engine_contracts::engine::stable_engine::StableEngineInitArgs;

        let mut stable = container.contract_ref::<StableToken>(env)?;
        let weth = container.contract_ref::<CollateralToken>(env)?;
        let feed = container.contract_ref::<MockPriceFeed>(env)?;

        let engine = StableEngine::load_or_deploy(
            &env,
            StableEngineInitArgs {
                collateral_assets: vec![weth.address()],
                price_feeds: vec![feed.address()],
                stable_token: stable.address(),
            },
            container,
            600_000_000_000
        )?;

        if stable.minter().is_none() {
            env.set_gas(100_000_000_000);
            stable.bind_minter(engine.address());
        }

        Ok(())
    }
}

/// Deploys everything needed for a local network.
pub struct LocalDeployScript;

impl DeployScript for LocalDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        StableTokenDeployScript.deploy(env, container)?;
        LocalCollateralDeployScript.deploy(env, container)?;
        EngineDeployScript.deploy(env, container)?;

        Ok(())
    }
}

/// Scenario to lock collateral and mint stable tokens against it.
pub struct DepositAndMintScenario;

impl Scenario for DepositAndMintScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "asset",
                "Address of the collateral asset",
                NamedCLType::Key,
            ),
            CommandArg::new(
                "amount",
                "Collateral amount (18 decimals)",
                NamedCLType::U256,
            ),
            CommandArg::new(
                "mint_amount",
                "Stable tokens to mint (18 decimals)",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut engine = container.contract_ref::<StableEngine>(env)?;
        let asset = args.get_single::<Address>("asset")?;
        let amount = args.get_single::<U256>("amount")?;
        let mint_amount = args.get_single::<U256>("mint_amount")?;

        env.set_gas(400_000_000_000);
        engine.try_deposit_collateral_and_mint(asset, amount, mint_amount)?;

        let caller = env.caller();
        println!("Health factor: {}", engine.health_factor(caller));
        Ok(())
    }
}

impl ScenarioMetadata for DepositAndMintScenario {
    const NAME: &'static str = "deposit-and-mint";
    const DESCRIPTION: &'static str = "Deposits collateral (approved beforehand) and mints stable tokens";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the overcollateralized stable engine")
        // Deploy scripts
        .deploy(StableTokenDeployScript)
        .deploy(LocalCollateralDeployScript)
        .deploy(EngineDeployScript)
        .deploy(LocalDeployScript)
        // Contract references
        .contract::<StableEngine>()
        .contract::<StableToken>()
        .contract::<CollateralToken>()
        .contract::<MockPriceFeed>()
        // Scenarios
        .scenario(DepositAndMintScenario)
        .build()
        .run();
}
