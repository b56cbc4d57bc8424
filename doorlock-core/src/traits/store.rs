//! Password slot store trait
//!
//! The stored password occupies five one-byte slots. An erased store reads
//! as zero in every slot.

use doorlock_protocol::{Password, PASSWORD_LEN};

/// Number of slots holding the stored password
pub const PASSWORD_SLOTS: u8 = PASSWORD_LEN as u8;

/// Errors from store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Slot index outside 0..PASSWORD_SLOTS
    InvalidSlot(u8),
    /// Bus or device error
    Bus,
    /// Backing storage rejected the write
    Storage,
}

/// Durable slot → byte store
pub trait SlotStore {
    /// Read one slot
    fn read(&mut self, slot: u8) -> impl core::future::Future<Output = Result<u8, StoreError>>;

    /// Write one slot
    fn write(
        &mut self,
        slot: u8,
        value: u8,
    ) -> impl core::future::Future<Output = Result<(), StoreError>>;

    /// Read all password slots
    fn load_password(
        &mut self,
    ) -> impl core::future::Future<Output = Result<Password, StoreError>> {
        async move {
            let mut bytes = [0u8; PASSWORD_LEN];
            for (slot, byte) in (0..PASSWORD_SLOTS).zip(bytes.iter_mut()) {
                *byte = self.read(slot).await?;
            }
            Ok(Password::new(bytes))
        }
    }

    /// Write all password slots, stopping at the first failure
    fn store_password(
        &mut self,
        password: &Password,
    ) -> impl core::future::Future<Output = Result<(), StoreError>> {
        async move {
            for (slot, &byte) in (0..PASSWORD_SLOTS).zip(password.as_bytes().iter()) {
                self.write(slot, byte).await?;
            }
            Ok(())
        }
    }
}
