use crate::adapters::storage::JsonRepository;
use crate::core::ensure_id;
use crate::domain::model::{Booking, BookingStatus, PaymentStatus, Vendor, Wedding};
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::validate_non_negative;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[derive(Clone)]
pub struct BookingService {
    bookings: JsonRepository<Booking>,
    weddings: JsonRepository<Wedding>,
    vendors: JsonRepository<Vendor>,
}

impl BookingService {
    pub fn new(
        bookings: JsonRepository<Booking>,
        weddings: JsonRepository<Wedding>,
        vendors: JsonRepository<Vendor>,
    ) -> Self {
        Self {
            bookings,
            weddings,
            vendors,
        }
    }

    pub async fn list(&self) -> Result<Vec<Booking>> {
        self.bookings.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Booking> {
        self.bookings.get(id).await
    }

    pub async fn create(&self, mut booking: Booking) -> Result<Booking> {
        validate_non_negative("totalCost", booking.total_cost)?;
        ensure_id(&mut booking, "booking-");
        booking.status = BookingStatus::Pending;
        booking.payment_status = PaymentStatus::Pending;
        booking.amount_paid = 0.0;
        booking.remaining_balance = booking.total_cost;

        let booking = self.bookings.save(booking).await?;
        tracing::info!(
            booking_id = %booking.booking_id,
            vendor_id = %booking.vendor_id,
            "Booking requested"
        );
        Ok(booking)
    }

    pub async fn update(&self, id: &str, mut booking: Booking) -> Result<Booking> {
        validate_non_negative("totalCost", booking.total_cost)?;
        validate_non_negative("amountPaid", booking.amount_paid)?;
        booking.booking_id = id.to_string();
        booking.recompute_balance();

        if !self.bookings.update(booking.clone()).await? {
            return Err(MarketError::not_found("Booking", id));
        }
        Ok(booking)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.bookings.delete(id).await? {
            return Err(MarketError::not_found("Booking", id));
        }
        Ok(())
    }

    /// Confirms the booking. When it names a wedding, the wedding's venue
    /// becomes the vendor's business name and address.
    pub async fn confirm(&self, id: &str) -> Result<Booking> {
        let booking = self
            .bookings
            .modify(id, |booking| {
                if booking.status == BookingStatus::Cancelled {
                    return Err(MarketError::Conflict {
                        message: format!("booking '{}' is cancelled", booking.booking_id),
                    });
                }
                booking.status = BookingStatus::Confirmed;
                Ok(())
            })
            .await?;
        tracing::info!(booking_id = %id, "Booking confirmed");

        if let Some(wedding_id) = booking.wedding_id.as_deref() {
            if let Some(vendor) = self.vendors.find_by_id(&booking.vendor_id).await? {
                let venue = vendor
                    .business_name
                    .clone()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| vendor.account.name.clone());
                let address = vendor.location.address.clone();
                match self
                    .weddings
                    .modify(wedding_id, |wedding| {
                        wedding.location = venue;
                        wedding.address = address;
                        Ok(())
                    })
                    .await
                {
                    Ok(_) => tracing::debug!(wedding_id = %wedding_id, "Wedding venue updated"),
                    Err(MarketError::NotFound { .. }) => {
                        tracing::debug!(wedding_id = %wedding_id, "Booking references unknown wedding")
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(booking)
    }

    pub async fn cancel(&self, id: &str) -> Result<Booking> {
        let booking = self
            .bookings
            .modify(id, |booking| {
                booking.status = BookingStatus::Cancelled;
                Ok(())
            })
            .await?;
        tracing::info!(booking_id = %id, "Booking cancelled");
        Ok(booking)
    }

    pub async fn record_payment(&self, id: &str, payment: PaymentRequest) -> Result<Booking> {
        if !payment.amount.is_finite() || payment.amount <= 0.0 {
            return Err(MarketError::validation(format!(
                "payment amount must be positive, got {}",
                payment.amount
            )));
        }

        let booking = self
            .bookings
            .modify(id, |booking| {
                if booking.status == BookingStatus::Cancelled {
                    return Err(MarketError::Conflict {
                        message: format!("booking '{}' is cancelled", booking.booking_id),
                    });
                }
                booking.apply_payment(payment.amount);
                booking.last_payment_date = Some(Utc::now());
                if payment.payment_method.is_some() {
                    booking.payment_method = payment.payment_method;
                }
                if payment.transaction_id.is_some() {
                    booking.transaction_id = payment.transaction_id;
                }
                Ok(())
            })
            .await?;
        tracing::info!(
            booking_id = %id,
            amount = payment.amount,
            remaining = booking.remaining_balance,
            "Payment recorded"
        );
        Ok(booking)
    }
}
