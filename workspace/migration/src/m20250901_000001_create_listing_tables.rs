use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create owners table
        manager
            .create_table(
                Table::create()
                    .table(Owners::Table)
                    .if_not_exists()
                    .col(pk_auto(Owners::Id))
                    .col(string(Owners::Name))
                    .col(string(Owners::Address))
                    .col(string(Owners::Photo))
                    .col(date(Owners::Birthday))
                    .col(string(Owners::Username).unique_key())
                    .col(string(Owners::PasswordHash))
                    .to_owned(),
            )
            .await?;

        // Create properties table. owner_id is a loose reference: no foreign key.
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(pk_auto(Properties::Id))
                    .col(string(Properties::Name))
                    .col(string(Properties::Address))
                    .col(decimal(Properties::Price).decimal_len(16, 4))
                    .col(integer(Properties::Year))
                    .col(integer_null(Properties::OwnerId))
                    .col(boolean(Properties::ForSale).default(true))
                    .to_owned(),
            )
            .await?;

        // Create property_images table
        manager
            .create_table(
                Table::create()
                    .table(PropertyImages::Table)
                    .if_not_exists()
                    .col(pk_auto(PropertyImages::Id))
                    .col(integer(PropertyImages::PropertyId))
                    .col(string(PropertyImages::File))
                    .col(boolean(PropertyImages::Enabled).default(true))
                    .to_owned(),
            )
            .await?;

        // Create property_traces table. One trace per property.
        manager
            .create_table(
                Table::create()
                    .table(PropertyTraces::Table)
                    .if_not_exists()
                    .col(pk_auto(PropertyTraces::Id))
                    .col(timestamp_with_time_zone(PropertyTraces::DateSale))
                    .col(string(PropertyTraces::Name))
                    .col(decimal(PropertyTraces::Value).decimal_len(16, 4))
                    .col(decimal(PropertyTraces::Tax).decimal_len(16, 4))
                    .col(integer(PropertyTraces::PropertyId).unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_property_images_property_id")
                    .table(PropertyImages::Table)
                    .col(PropertyImages::PropertyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyTraces::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PropertyImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Owners::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Owners {
    Table,
    Id,
    Name,
    Address,
    Photo,
    Birthday,
    Username,
    PasswordHash,
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Name,
    Address,
    Price,
    Year,
    OwnerId,
    ForSale,
}

#[derive(DeriveIden)]
enum PropertyImages {
    Table,
    Id,
    PropertyId,
    File,
    Enabled,
}

#[derive(DeriveIden)]
enum PropertyTraces {
    Table,
    Id,
    DateSale,
    Name,
    Value,
    Tax,
    PropertyId,
}
