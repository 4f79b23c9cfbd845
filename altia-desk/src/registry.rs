//! Table registry: occupancy listing, assignment, clearing, delete guards

use crate::{DeskError, DeskResult};
use altia_client::AltiaClient;
use shared::models::{Table, TableAssign, TableCreate, TableStatus, TableUpdate};
use validator::Validate;

/// Occupancy tallies for the dashboard header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OccupancySummary {
    pub free: usize,
    pub occupied: usize,
    pub reserved: usize,
}

/// Shared table service consumed by the table and dashboard views
#[derive(Debug, Clone)]
pub struct TableRegistry {
    client: AltiaClient,
}

impl TableRegistry {
    pub fn new(client: AltiaClient) -> Self {
        Self { client }
    }

    /// All tables with their current occupant
    pub async fn list(&self) -> DeskResult<Vec<Table>> {
        Ok(self.client.list_tables().await?)
    }

    /// Occupancy tallies. A failed fetch logs and yields an empty
    /// summary; the dashboard never blocks on a read error.
    pub async fn occupancy(&self) -> OccupancySummary {
        let tables = match self.client.list_tables().await {
            Ok(tables) => tables,
            Err(e) => {
                tracing::warn!("table list fetch failed: {e}");
                return OccupancySummary::default();
            }
        };

        let mut summary = OccupancySummary::default();
        for table in &tables {
            match table.status {
                TableStatus::Free => summary.free += 1,
                TableStatus::Occupied => summary.occupied += 1,
                TableStatus::Reserved => summary.reserved += 1,
            }
        }
        summary
    }

    /// Add a table to the floor plan
    pub async fn create(&self, payload: TableCreate) -> DeskResult<Table> {
        payload.validate()?;
        Ok(self.client.create_table(&payload).await?)
    }

    /// Rename or move a table
    pub async fn update(&self, table: &Table, payload: TableUpdate) -> DeskResult<Table> {
        Ok(self.client.update_table(table.id, &payload).await?)
    }

    /// Seat or reserve for a registered customer. `status` must be
    /// occupied or reserved. Reassigning an occupied table is destructive
    /// and requires `confirm`; orders already placed stay linked to the
    /// original customer.
    pub async fn assign_customer(
        &self,
        table: &Table,
        customer_id: i64,
        status: TableStatus,
        confirm: bool,
    ) -> DeskResult<Table> {
        if status == TableStatus::Free {
            return Err(DeskError::Validation(
                "assignment status must be occupied or reserved".to_string(),
            ));
        }
        self.check_transition(table, status)?;
        self.check_reassignment(table, confirm)?;

        let payload = TableAssign {
            status,
            customer_id: Some(customer_id),
            guest_name: None,
            guest_phone: None,
        };
        tracing::info!(table = table.id, customer = customer_id, status = %status, "assigning customer");
        Ok(self.client.assign_table(table.id, &payload).await?)
    }

    /// Seat a walk-in guest; always transitions to occupied. The same
    /// confirmation gate applies when the table is already occupied.
    pub async fn assign_guest(
        &self,
        table: &Table,
        name: &str,
        phone: Option<&str>,
        confirm: bool,
    ) -> DeskResult<Table> {
        if name.trim().is_empty() {
            return Err(DeskError::Validation("guest name is required".to_string()));
        }
        self.check_transition(table, TableStatus::Occupied)?;
        self.check_reassignment(table, confirm)?;

        let payload = TableAssign {
            status: TableStatus::Occupied,
            customer_id: None,
            guest_name: Some(name.trim().to_string()),
            guest_phone: phone.map(|p| p.to_string()),
        };
        tracing::info!(table = table.id, guest = name, "seating guest");
        Ok(self.client.assign_table(table.id, &payload).await?)
    }

    /// Free the table, clearing all occupant fields
    pub async fn clear(&self, table: &Table) -> DeskResult<Table> {
        self.check_transition(table, TableStatus::Free)?;
        Ok(self.client.assign_table(table.id, &TableAssign::free()).await?)
    }

    /// Delete a table; refused locally unless it is free. The backend
    /// enforces the same rule.
    pub async fn delete(&self, table: &Table) -> DeskResult<()> {
        if table.status != TableStatus::Free {
            return Err(DeskError::BusinessRule(format!(
                "Table {} is {} and cannot be deleted; clear it first",
                table.name, table.status
            )));
        }
        self.client.delete_table(table.id).await?;
        Ok(())
    }

    fn check_transition(&self, table: &Table, next: TableStatus) -> DeskResult<()> {
        if !table.status.can_transition_to(next) {
            return Err(DeskError::Transition {
                from: table.status,
                to: next,
            });
        }
        Ok(())
    }

    fn check_reassignment(&self, table: &Table, confirm: bool) -> DeskResult<()> {
        if table.status == TableStatus::Occupied && !confirm {
            return Err(DeskError::BusinessRule(format!(
                "Table {} is already occupied; reassignment must be confirmed",
                table.name
            )));
        }
        Ok(())
    }
}
