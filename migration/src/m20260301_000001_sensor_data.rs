use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== SENSOR ==========
        manager
            .create_table(
                Table::create()
                    .table(Sensor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sensor::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sensor::Name).text().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        // ========== UNIT ==========
        manager
            .create_table(
                Table::create()
                    .table(Unit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Unit::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Unit::Name).text().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        // ========== VALNAME ==========
        manager
            .create_table(
                Table::create()
                    .table(Valname::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Valname::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Valname::Name).text().not_null().unique_key())
                    .col(ColumnDef::new(Valname::UnitId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_valname_unit")
                            .from(Valname::Table, Valname::UnitId)
                            .to(Unit::Table, Unit::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== VALREAL (history) ==========
        manager
            .create_table(
                Table::create()
                    .table(Valreal::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Valreal::Timestamp)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Valreal::SensorId).integer().not_null())
                    .col(ColumnDef::new(Valreal::ValnameId).integer().not_null())
                    .col(ColumnDef::new(Valreal::Value).double())
                    .primary_key(
                        Index::create()
                            .col(Valreal::Timestamp)
                            .col(Valreal::SensorId)
                            .col(Valreal::ValnameId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_valreal_sensor")
                            .from(Valreal::Table, Valreal::SensorId)
                            .to(Sensor::Table, Sensor::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_valreal_valname")
                            .from(Valreal::Table, Valreal::ValnameId)
                            .to(Valname::Table, Valname::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== VALSENSOR (current snapshot) ==========
        manager
            .create_table(
                Table::create()
                    .table(Valsensor::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Valsensor::ValnameId).integer().not_null())
                    .col(ColumnDef::new(Valsensor::SensorId).integer().not_null())
                    .col(
                        ColumnDef::new(Valsensor::Timestamp)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Valsensor::Value).double())
                    .primary_key(
                        Index::create()
                            .col(Valsensor::ValnameId)
                            .col(Valsensor::SensorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_valsensor_sensor")
                            .from(Valsensor::Table, Valsensor::SensorId)
                            .to(Sensor::Table, Sensor::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_valsensor_valname")
                            .from(Valsensor::Table, Valsensor::ValnameId)
                            .to(Valname::Table, Valname::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Graph queries filter by sensor + value name inside a time range
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_valreal_sensor_valname_timestamp")
                    .table(Valreal::Table)
                    .col(Valreal::SensorId)
                    .col(Valreal::ValnameId)
                    .col(Valreal::Timestamp)
                    .to_owned(),
            )
            .await?;

        // Keeps the snapshot current on every history insert
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TRIGGER IF NOT EXISTS valsensor_valreal_trigger AFTER INSERT ON valreal \
                 BEGIN \
                 INSERT OR REPLACE INTO valsensor (valname_id, sensor_id, timestamp, value) \
                 VALUES (NEW.valname_id, NEW.sensor_id, NEW.timestamp, NEW.value); \
                 END;",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS valsensor_valreal_trigger")
            .await?;
        manager
            .drop_table(Table::drop().table(Valsensor::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Valreal::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Valname::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Unit::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sensor::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Sensor {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum Unit {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum Valname {
    Table,
    Id,
    Name,
    UnitId,
}

#[derive(DeriveIden)]
pub enum Valreal {
    Table,
    Timestamp,
    SensorId,
    ValnameId,
    Value,
}

#[derive(DeriveIden)]
pub enum Valsensor {
    Table,
    ValnameId,
    SensorId,
    Timestamp,
    Value,
}
