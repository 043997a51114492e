//! NVS-backed score store: two u16 keys in their own namespace.

use esp_idf_svc::nvs::{EspNvs, EspNvsPartition, NvsDefault};
use esp_idf_svc::sys::EspError;

use pongboard_core::{Player, ScoreStore};

const NAMESPACE: &str = "scores";
const KEY_PLAYER1: &str = "p1_all_time";
const KEY_PLAYER2: &str = "p2_all_time";

pub struct NvsScoreStore {
    nvs: EspNvs<NvsDefault>,
}

impl NvsScoreStore {
    pub fn new(partition: EspNvsPartition<NvsDefault>) -> Result<Self, EspError> {
        Ok(Self {
            nvs: EspNvs::new(partition, NAMESPACE, true)?,
        })
    }

    fn key(player: Player) -> &'static str {
        match player {
            Player::One => KEY_PLAYER1,
            Player::Two => KEY_PLAYER2,
        }
    }
}

impl ScoreStore for NvsScoreStore {
    fn read(&mut self, player: Player) -> u16 {
        match self.nvs.get_u16(Self::key(player)) {
            Ok(Some(value)) => value,
            Ok(None) => 0,
            Err(err) => {
                log::warn!("nvs: read for {player:?} failed: {err}");
                0
            }
        }
    }

    fn write(&mut self, player: Player, value: u16) {
        if let Err(err) = self.nvs.set_u16(Self::key(player), value) {
            log::warn!("nvs: write for {player:?} failed: {err}");
        }
    }
}
