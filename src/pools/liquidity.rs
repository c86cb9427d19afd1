//! Liquidity deposits and withdrawals.
//!
//! # Share Accounting
//!
//! The first deposit into an empty pool mints shares 1:1 with the base
//! currency supplied and takes the asset amount the depositor names, which
//! sets the price.  Later deposits must match the current ratio:
//!
//! ```text
//! asset_required = floor(base_in · asset_reserve / base_reserve) + 1
//! shares_minted  = floor(base_in · total_shares  / base_reserve)
//! ```
//!
//! Withdrawals pay out `floor(shares · reserve / total_shares)` of each
//! side.  Every rounding step leaves the remainder in the pool.

use super::exchange::{non_zero, reject_value};
use super::Exchange;
use crate::domain::{Amount, CallContext, Event, Rounding, Shares, Timestamp};
use crate::env::Env;
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

impl Exchange {
    /// Deposits the attached value and up to `max_assets` of the asset,
    /// minting shares to the caller.  Returns the shares minted.
    ///
    /// `min_shares` is ignored when seeding an empty pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `deadline` has passed.
    /// - [`AmmError::InvalidAmount`] if the value or `max_assets` is zero,
    ///   if `min_shares` is zero for a non-empty pool, or if a seeding
    ///   deposit is below the configured minimum.
    /// - [`AmmError::SlippageExceeded`] if the asset required exceeds
    ///   `max_assets` or the shares minted fall below `min_shares`.
    /// - [`AmmError::Ledger`] if the asset pull fails.
    pub fn add_liquidity(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        min_shares: Shares,
        max_assets: Amount,
        deadline: Timestamp,
    ) -> Result<Shares> {
        self.atomically(env, "add_liquidity", |pool, env| {
            Self::ensure_live(env, deadline)?;
            let base_in = ctx.value();
            non_zero(max_assets, "maximum assets must be positive")?;
            non_zero(base_in, "base deposit must be positive")?;

            pool.receive_value(env, ctx)?;
            let (minted, asset_in) = if pool.total_shares().is_zero() {
                pool.bootstrap_terms(base_in, max_assets)?
            } else {
                if min_shares.is_zero() {
                    return Err(AmmError::InvalidAmount("minimum shares must be positive"));
                }
                let base_reserve = pool.base_reserve(env).safe_sub(&base_in)?;
                let asset_reserve = pool.asset_reserve(env)?;
                pool.proportional_terms(base_in, base_reserve, asset_reserve, min_shares, max_assets)?
            };

            pool.mint_shares(env, ctx.caller(), minted)?;
            pool.pull_asset(env, ctx.caller(), asset_in)?;
            env.emit(
                pool.address(),
                Event::AddLiquidity {
                    provider: ctx.caller(),
                    base_amount: base_in,
                    asset_amount: asset_in,
                },
            );
            pool.log_commit("add_liquidity", ctx.caller(), base_in, asset_in);
            Ok(minted)
        })
    }

    /// Burns `shares` of the caller and pays out the pro-rata reserves.
    /// Returns `(base_out, asset_out)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `deadline` has passed.
    /// - [`AmmError::InvalidAmount`] if any amount is zero or the call
    ///   carries value.
    /// - [`AmmError::SlippageExceeded`] if either payout is below its
    ///   minimum.
    /// - [`AmmError::InsufficientShares`] if the caller holds fewer than
    ///   `shares`.
    /// - [`AmmError::Ledger`] if the caller refuses the base payout.
    pub fn remove_liquidity(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        shares: Shares,
        min_base: Amount,
        min_assets: Amount,
        deadline: Timestamp,
    ) -> Result<(Amount, Amount)> {
        self.atomically(env, "remove_liquidity", |pool, env| {
            reject_value(ctx)?;
            Self::ensure_live(env, deadline)?;
            if shares.is_zero() {
                return Err(AmmError::InvalidAmount("shares must be positive"));
            }
            non_zero(min_base, "minimum base must be positive")?;
            non_zero(min_assets, "minimum assets must be positive")?;

            let total = pool.total_shares();
            if total.is_zero() {
                return Err(AmmError::InsufficientShares);
            }
            let base_out = pro_rata(shares, pool.base_reserve(env), total)?;
            let asset_out = pro_rata(shares, pool.asset_reserve(env)?, total)?;
            if base_out < min_base {
                return Err(AmmError::SlippageExceeded("base withdrawn below minimum"));
            }
            if asset_out < min_assets {
                return Err(AmmError::SlippageExceeded("assets withdrawn below minimum"));
            }

            pool.burn_shares(env, ctx.caller(), shares)?;
            pool.pay_base(env, ctx.caller(), base_out)?;
            pool.send_asset(env, ctx.caller(), asset_out)?;
            env.emit(
                pool.address(),
                Event::RemoveLiquidity {
                    provider: ctx.caller(),
                    base_amount: base_out,
                    asset_amount: asset_out,
                },
            );
            pool.log_commit("remove_liquidity", ctx.caller(), base_out, asset_out);
            Ok((base_out, asset_out))
        })
    }

    fn bootstrap_terms(&self, base_in: Amount, max_assets: Amount) -> Result<(Shares, Amount)> {
        if base_in < self.config().min_bootstrap_base() {
            return Err(AmmError::InvalidAmount("initial deposit below minimum"));
        }
        Ok((Shares::from(base_in), max_assets))
    }

    fn proportional_terms(
        &self,
        base_in: Amount,
        base_reserve: Amount,
        asset_reserve: Amount,
        min_shares: Shares,
        max_assets: Amount,
    ) -> Result<(Shares, Amount)> {
        let asset_in = base_in
            .safe_mul(&asset_reserve)?
            .safe_div(&base_reserve, Rounding::Down)?
            .safe_add(&Amount::new(1))?;
        let minted = Shares::from(
            base_in
                .safe_mul(&self.total_shares().as_amount())?
                .safe_div(&base_reserve, Rounding::Down)?,
        );
        if asset_in > max_assets {
            return Err(AmmError::SlippageExceeded("assets required above maximum"));
        }
        if minted < min_shares {
            return Err(AmmError::SlippageExceeded("shares minted below minimum"));
        }
        Ok((minted, asset_in))
    }
}

/// `floor(shares · reserve / total)`.
fn pro_rata(shares: Shares, reserve: Amount, total: Shares) -> Result<Amount> {
    shares
        .checked_mul_amount(&reserve)
        .ok_or(AmmError::Overflow("withdrawal product overflow"))?
        .safe_div(&total.as_amount(), Rounding::Down)
}
