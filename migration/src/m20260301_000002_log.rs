use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Timestamps are nanoseconds since the Unix epoch, written by the daemons' log sink
        manager
            .create_table(
                Table::create()
                    .table(Log::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Log::Timestamp)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Log::Level).integer().not_null())
                    .col(ColumnDef::new(Log::Thread).big_integer())
                    .col(ColumnDef::new(Log::Msgid).big_integer())
                    .col(ColumnDef::new(Log::Logger).text())
                    .col(ColumnDef::new(Log::Message).text())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Log::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Log {
    Table,
    Timestamp,
    Level,
    Thread,
    Msgid,
    Logger,
    Message,
}
